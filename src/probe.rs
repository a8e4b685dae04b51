//! Canned probe sequence sent when no test string is given.
//!
//! The messages target a register read/write protocol of an unspecified
//! device. They are sent verbatim and are not interpreted here.

pub const PROBE_MESSAGES: [&str; 11] = [
    "%01#WCSR00121",
    "%01#RCSR0012",
    "%01#WCSR00120",
    "%01#RCSR0012",
    "%01#WCP5R00101R00130R00140R00151R00161",
    "%01#RCP5R0010R0013R0014R0015R0016",
    "%01#WDD0200002002050007150009",
    "%01#RDD0200002020",
    "%01#RDD0200102001",
    "%01#WDD0200102001ABCD",
    "%01#RDD0200102001",
];
