/// Run-wide flags, read once at startup and shared by reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Emit rows with their original capitalization instead of uppercasing them.
    pub unlock_caps: bool,
    /// Stop after writing the markup source; no external tool is invoked.
    pub mute_pdf: bool,
    /// Skip background graphics and request low-quality row effects.
    pub draft: bool,
    /// Verbose diagnostics; typesetter output goes to the terminal instead of a log file.
    pub debug: bool,
}
