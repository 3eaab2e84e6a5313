//! Pick a symbolizer based on the architecture of the artifact.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use object::{Architecture, Object};

/// `addr2line` from the ESP32 Xtensa toolchain.
pub const XTENSA_ADDR2LINE: &str = "xtensa-esp32-elf-addr2line";

/// `addr2line` from the ESP32-C/H RISC-V toolchain.
pub const RISCV32_ADDR2LINE: &str = "riscv32-esp-elf-addr2line";

pub fn tool_for_architecture(arch: Architecture) -> &'static str {
    match arch {
        Architecture::Riscv32 => RISCV32_ADDR2LINE,
        _ => XTENSA_ADDR2LINE,
    }
}

/// Choose the symbolizer for `artifact`.
///
/// Falls back to [`XTENSA_ADDR2LINE`] if the artifact can't be read as an
/// object file. The symbolizer will then report the problem itself.
pub fn default_tool(artifact: &Path) -> &'static str {
    match architecture(artifact) {
        Ok(arch) => {
            let tool = tool_for_architecture(arch);
            log::debug!("`{}` is {arch:?}, using `{tool}`", artifact.display());
            tool
        }
        Err(e) => {
            log::warn!("{e:#}, falling back to `{XTENSA_ADDR2LINE}`");
            XTENSA_ADDR2LINE
        }
    }
}

fn architecture(path: &Path) -> anyhow::Result<Architecture> {
    let file = File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let data = unsafe { memmap2::Mmap::map(&file) }
        .with_context(|| format!("failed to mmap `{}`", path.display()))?;
    let file = object::File::parse(&*data)
        .with_context(|| format!("failed to parse `{}`", path.display()))?;

    Ok(file.architecture())
}
