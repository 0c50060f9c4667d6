use std::sync::mpsc::Sender;

/// Sink for gene changes, so outside code (a settings panel, a sharing
/// widget) can stay in sync with the genome.
pub trait ParameterObserver: Send {
    fn on_parameter_changed(&mut self, name: &'static str, value: i32);
}

pub struct NoopObserver;

impl ParameterObserver for NoopObserver {
    fn on_parameter_changed(&mut self, _name: &'static str, _value: i32) {}
}

/// Writes every change to the log at debug level
pub struct LoggingObserver;

impl ParameterObserver for LoggingObserver {
    fn on_parameter_changed(&mut self, name: &'static str, value: i32) {
        log::debug!("gene {} = {}", name, value);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterChange {
    pub name: &'static str,
    pub value: i32,
}

// For a UI thread listening on the other end
pub struct ChannelObserver {
    sender: Sender<ParameterChange>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<ParameterChange>) -> Self {
        Self { sender }
    }
}

impl ParameterObserver for ChannelObserver {
    fn on_parameter_changed(&mut self, name: &'static str, value: i32) {
        let _ = self.sender.send(ParameterChange { name, value });
    }
}
