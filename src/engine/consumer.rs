//! Consumer boundary: runs an [`IndexBuilder`] on its own thread behind channels.
//!
//! Inbound: file entries, then one end-of-input. Outbound: exactly one [`ConsumerOutput`].

use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use std::thread::{self, JoinHandle};

use crate::engine::builder::IndexBuilder;
use crate::utils::config::STREAMING_CHANNEL_CAP;
use crate::{ConsumerInput, ConsumerOutput, FileEntry};

/// Handle to a running consumer. Drop without `wait` to abandon it.
pub struct ConsumerHandle {
    input_tx: Sender<ConsumerInput>,
    output_rx: Receiver<ConsumerOutput>,
    handle: JoinHandle<()>,
}

/// Start `builder` on a consumer thread.
pub fn spawn_consumer(builder: Box<dyn IndexBuilder>) -> ConsumerHandle {
    let (input_tx, input_rx) = bounded::<ConsumerInput>(STREAMING_CHANNEL_CAP);
    let (output_tx, output_rx) = bounded::<ConsumerOutput>(1);
    let handle = thread::spawn(move || consumer_loop(builder, input_rx, output_tx));
    ConsumerHandle {
        input_tx,
        output_rx,
        handle,
    }
}

fn consumer_loop(
    mut builder: Box<dyn IndexBuilder>,
    input_rx: Receiver<ConsumerInput>,
    output_tx: Sender<ConsumerOutput>,
) {
    let mut received = 0_usize;
    let output = loop {
        match input_rx.recv() {
            Ok(ConsumerInput::Entry(entry)) => {
                received += 1;
                if let Err(e) = builder.receive_input(entry) {
                    break ConsumerOutput::Error(format!("{e:#}"));
                }
            }
            Ok(ConsumerInput::EndOfInput) => {
                debug!("consumer: end of input after {} entries", received);
                break match builder.finish() {
                    Ok(result) => ConsumerOutput::Result(result),
                    Err(e) => ConsumerOutput::Error(format!("{e:#}")),
                };
            }
            Err(_) => {
                break ConsumerOutput::Error("input closed before end of input".to_string());
            }
        }
    };
    let _ = output_tx.send(output);
}

impl ConsumerHandle {
    /// Send one entry. Returns false if the consumer has already stopped (it reported an error).
    pub fn send_input(&self, entry: FileEntry) -> bool {
        self.input_tx.send(ConsumerInput::Entry(entry)).is_ok()
    }

    /// Signal that no more entries follow.
    pub fn send_end_of_input(&self) {
        let _ = self.input_tx.send(ConsumerInput::EndOfInput);
    }

    /// Block until the consumer produces its output, then join its thread.
    pub fn wait(self) -> Result<ConsumerOutput> {
        let ConsumerHandle {
            input_tx,
            output_rx,
            handle,
        } = self;
        drop(input_tx);
        let output = output_rx.recv();
        handle
            .join()
            .map_err(|_| anyhow!("index consumer thread panicked"))?;
        output.map_err(|_| anyhow!("index consumer exited without output"))
    }
}
