use log::trace;

/// One decoded instruction, reported just before it executes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Address the opcode was fetched from
    pub pc: u16,
    pub opcode: u16,
    pub mnemonic: String,
}

/// Receives every instruction the machine executes.
///
/// Nothing is traced unless a sink is installed with `Chip8::set_trace_sink`.
/// Any `FnMut(&TraceEvent)` closure is a sink.
pub trait TraceSink {
    fn record(&mut self, event: &TraceEvent);
}

impl<F> TraceSink for F
where
    F: FnMut(&TraceEvent),
{
    fn record(&mut self, event: &TraceEvent) {
        self(event)
    }
}

/// Forwards trace events to the `log` facade at trace level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&mut self, event: &TraceEvent) {
        trace!("{:#06X}: {:04X} {}", event.pc, event.opcode, event.mnemonic);
    }
}
