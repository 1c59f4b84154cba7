use crate::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// How the forward phase treats the candidates of a layer once the end cell is among them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpansionMode {
    /// Labelling stops at the end cell; candidates found after it stay unlabelled this tick.
    #[default]
    StopAtEnd,
    /// Every candidate other than the end cell is labelled.
    LabelAll,
}

/// How the backward phase treats the start cell when it shows up among the candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BacktraceMode {
    /// Meeting the start cell aborts the scan and keeps the previous cursor.
    #[default]
    Faithful,
    /// The start cell counts as layer 0 and the true minimum is always taken, so the cursor ends
    /// on the start cell.
    TrueMinimum,
}

/// Construction parameters of a [SearchEngine](crate::SearchEngine). Dimensions are fixed for
/// the lifetime of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub backtrace: BacktraceMode,
    pub expansion: ExpansionMode,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl EngineConfig {
    pub fn new(width: usize, height: usize) -> EngineConfig {
        EngineConfig {
            width,
            height,
            backtrace: BacktraceMode::default(),
            expansion: ExpansionMode::default(),
        }
    }
    pub fn with_backtrace(mut self, backtrace: BacktraceMode) -> EngineConfig {
        self.backtrace = backtrace;
        self
    }
    pub fn with_expansion(mut self, expansion: ExpansionMode) -> EngineConfig {
        self.expansion = expansion;
        self
    }
}
