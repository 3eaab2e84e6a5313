//! Extraction of backtrace addresses from command-line arguments.

use crate::Error;

/// Prefix of the label that panic handlers print in front of the frames.
///
/// Matched case-insensitively so that `Backtrace:`, `backtrace` and
/// `BACKTRACE:` are all accepted.
const LABEL: &str = "backtrace";

const ADDRESS_PREFIX: &str = "0x";

/// Split the arguments into an ordered list of address tokens.
///
/// Every argument is split on whitespace, so a backtrace pasted as a single
/// quoted string and one passed as separate arguments produce the same list.
/// The first token is dropped if it is a `backtrace` label. Any other token
/// must start with `0x`.
///
/// Tokens are returned verbatim. ESP-IDF prints frames as `PC:SP` pairs and
/// those are left for the symbolizer to handle.
pub fn extract_addresses<I, S>(args: I) -> Result<Vec<String>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut addresses = Vec::new();
    let mut leading = true;

    for arg in args {
        for token in arg.as_ref().split_whitespace() {
            let first = std::mem::replace(&mut leading, false);
            if first && addresses.is_empty() && is_label(token) {
                continue;
            }

            if !token.starts_with(ADDRESS_PREFIX) {
                return Err(Error::InvalidAddress(token.to_owned()));
            }

            addresses.push(token.to_owned());
        }
    }

    Ok(addresses)
}

fn is_label(token: &str) -> bool {
    token
        .get(..LABEL.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(LABEL))
}
