#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub found: bool,
    pub binary: bool,
    pub source: Vec<u8>,
    pub output: Vec<u8>,
}

impl ScanOutcome {
    pub fn changed(&self) -> bool {
        self.found && self.source != self.output
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub files_changed: usize,
}

impl RunSummary {
    pub fn changed(&self) -> bool {
        self.files_changed > 0
    }
}
