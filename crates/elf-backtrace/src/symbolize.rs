use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::Error;

/// Flags passed to `addr2line`: pretty print, function names, inlined frames,
/// addresses and demangled C++ names.
pub const ADDR2LINE_FLAGS: &str = "-pfiaC";

/// Something that can resolve a single address within an artifact.
///
/// Output goes straight to the terminal, nothing is returned to the caller.
pub trait Symbolizer {
    fn symbolize(&mut self, artifact: &Path, address: &str) -> Result<(), Error>;
}

/// Runs an external `addr2line` once per address with inherited stdio.
#[derive(Clone, Debug, Default)]
pub struct Addr2Line {
    tool: Option<String>,
}

impl Addr2Line {
    /// Create a new symbolizer.
    ///
    /// If `tool` is `None` then the executable is chosen from the architecture
    /// of the first artifact it is asked to symbolize.
    pub fn new(tool: impl Into<Option<String>>) -> Self {
        Self { tool: tool.into() }
    }

    /// The executable in use, if one has been chosen yet.
    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    fn resolve_tool(&mut self, artifact: &Path) -> &str {
        self.tool
            .get_or_insert_with(|| crate::inspect::default_tool(artifact).to_owned())
    }

    /// Build the command line used to symbolize `address`.
    pub fn command(&mut self, artifact: &Path, address: &str) -> Command {
        let mut command = Command::new(self.resolve_tool(artifact));
        command
            .arg(ADDR2LINE_FLAGS)
            .arg("-e")
            .arg(artifact)
            .arg(address)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }
}

impl Symbolizer for Addr2Line {
    fn symbolize(&mut self, artifact: &Path, address: &str) -> Result<(), Error> {
        let mut command = self.command(artifact, address);
        let tool = command.get_program().to_string_lossy().into_owned();

        log::debug!("running {command:?}");
        let status = command
            .status()
            .map_err(|source| Error::Spawn {
                tool: tool.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::ToolFailed {
                tool,
                address: address.to_owned(),
                status,
            });
        }

        Ok(())
    }
}

/// Write the banner line for `artifact`.
pub fn write_banner<W: Write>(out: &mut W, artifact: &Path) -> std::io::Result<()> {
    writeln!(
        out,
        "======================== Backtrace ({}) =============================",
        artifact.display()
    )
}

/// Symbolize every address in order, stopping at the first failure.
///
/// The banner is written and flushed before the symbolizer first runs so it
/// appears ahead of the symbolizer's own output.
pub fn symbolize_all<S, W>(
    symbolizer: &mut S,
    artifact: &Path,
    addresses: &[String],
    out: &mut W,
) -> Result<(), Error>
where
    S: Symbolizer + ?Sized,
    W: Write,
{
    write_banner(out, artifact).map_err(Error::Output)?;
    out.flush().map_err(Error::Output)?;

    for address in addresses {
        symbolizer.symbolize(artifact, address)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::path::PathBuf;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(PathBuf, String)>,
        fail_on: Option<&'static str>,
    }

    impl Symbolizer for Recorder {
        fn symbolize(&mut self, artifact: &Path, address: &str) -> Result<(), Error> {
            self.calls.push((artifact.to_path_buf(), address.to_owned()));
            match self.fail_on {
                Some(fail) if fail == address => Err(Error::InvalidAddress(address.to_owned())),
                _ => Ok(()),
            }
        }
    }

    fn addresses(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn command_line() {
        let mut a2l = Addr2Line::new("xtensa-esp32-elf-addr2line".to_owned());
        let command = a2l.command(Path::new("./build/fw.elf"), "0x400d1234");

        assert_eq!(command.get_program(), "xtensa-esp32-elf-addr2line");
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(args, ["-pfiaC", "-e", "./build/fw.elf", "0x400d1234"]);
    }

    #[test]
    fn banner_precedes_calls_in_order() {
        let mut recorder = Recorder::default();
        let mut out = Vec::new();
        let artifact = Path::new("./build/fw.elf");

        symbolize_all(&mut recorder, artifact, &addresses(&["0x2", "0x1", "0x2"]), &mut out)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "======================== Backtrace (./build/fw.elf) =============================\n"
        );
        let called: Vec<&str> = recorder.calls.iter().map(|(_, a)| a.as_str()).collect();
        assert_eq!(called, ["0x2", "0x1", "0x2"]);
        assert!(recorder.calls.iter().all(|(path, _)| path == artifact));
    }

    #[test]
    fn failure_aborts_remaining_addresses() {
        let mut recorder = Recorder {
            fail_on: Some("0x2"),
            ..Default::default()
        };
        let mut out = Vec::new();

        let result = symbolize_all(
            &mut recorder,
            Path::new("fw.elf"),
            &addresses(&["0x1", "0x2", "0x3"]),
            &mut out,
        );

        assert!(result.is_err());
        assert_eq!(recorder.calls.len(), 2);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn banner_write_failure_stops_before_symbolizing() {
        let mut recorder = Recorder::default();

        let err = symbolize_all(
            &mut recorder,
            Path::new("fw.elf"),
            &addresses(&["0x1"]),
            &mut BrokenPipe,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Output(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn missing_tool() {
        let mut a2l = Addr2Line::new("elf-backtrace-no-such-addr2line".to_owned());
        let err = a2l.symbolize(Path::new("fw.elf"), "0x1").unwrap_err();

        assert!(matches!(err, Error::Spawn { ref tool, .. } if tool == "elf-backtrace-no-such-addr2line"));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_status() {
        let mut a2l = Addr2Line::new("false".to_owned());
        let err = a2l.symbolize(Path::new("fw.elf"), "0x1").unwrap_err();

        assert!(matches!(err, Error::ToolFailed { ref address, .. } if address == "0x1"));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_status() {
        let mut a2l = Addr2Line::new("true".to_owned());
        a2l.symbolize(Path::new("fw.elf"), "0x1").unwrap();
    }
}
