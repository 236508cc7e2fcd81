pub(crate) mod blend;
pub(crate) mod engine;
pub(crate) mod output;
pub(crate) mod parallel;
pub(crate) mod sequential;
pub(crate) mod sort;
pub(crate) mod stack;
