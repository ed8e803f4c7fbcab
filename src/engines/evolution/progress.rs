use crate::types::GenerationRecord;
use std::sync::mpsc::Sender;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, record: &GenerationRecord);
    fn on_extinction(&mut self, generation: usize);
}

pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting...", generation);
    }

    fn on_generation_complete(&mut self, record: &GenerationRecord) {
        log::info!(
            "Generation {:2}: {:3} universes | Omega_Lambda = {:.3} ± {:.3}",
            record.generation,
            record.population,
            record.mean_omega_lambda,
            record.std_omega_lambda
        );
    }

    fn on_extinction(&mut self, generation: usize) {
        log::warn!("Generation {}: EXTINCTION", generation);
    }
}

/// Forwards progress to another thread
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete(GenerationRecord),
    Extinction(usize),
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, record: &GenerationRecord) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete(record.clone()));
    }

    fn on_extinction(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::Extinction(generation));
    }
}
