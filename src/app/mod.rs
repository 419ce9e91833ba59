// Application layer: presentation of a finished run.

pub mod report;
