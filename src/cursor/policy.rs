/// Selects whether the cursor verifies every primitive scan against the end of input before
///  dereferencing (`Checked`) or assumes well-formed, in-bounds input and elides the checks
///  (`Unchecked`). This mirrors the teacher's generic-parameter style (e.g. `JsonFormatter`,
///  `FloatFormat`) rather than a runtime flag, so the compiler can fully eliminate the checked
///  branch under `Unchecked`.
pub trait Policy: Copy + Default {
    const CHECKED: bool;
}

/// Every primitive scan verifies `first < last` before dereferencing; malformed or truncated
///  input fails with a located `ParseError` instead of reading out of bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checked;
impl Policy for Checked {
    const CHECKED: bool = true;
}

/// No bounds checks are performed. Valid only for input that is already known to be well-formed
///  JSON; behavior on malformed input is undefined (the cursor may read past the end of the
///  slice).
#[derive(Debug, Clone, Copy, Default)]
pub struct Unchecked;
impl Policy for Unchecked {
    const CHECKED: bool = false;
}

/// Whether whitespace-skipping also treats comments as insignificant. `Comments::None` is
///  strict RFC 8259 JSON; the other two variants are the library's extensions for config-file-ish
///  JSON supersets.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Comments {
    #[default]
    None,
    CppStyle,
    HashStyle,
}
