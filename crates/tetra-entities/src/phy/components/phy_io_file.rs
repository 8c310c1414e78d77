use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::thread;

use crossbeam_channel::{Sender, unbounded};

/// Messages for the background mirror writer.
#[derive(Debug, Clone)]
pub enum FileWriteMsg {
    WriteBlock(Vec<u8>),
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhyIoFileMode {
    Write,
    Read,
}

#[derive(Debug)]
pub enum PhyIoError {
    Io(String),
    Eof,
}

impl From<io::Error> for PhyIoError {
    fn from(err: io::Error) -> Self {
        PhyIoError::Io(err.to_string())
    }
}

/// Raw bit-stream file, used to replay recorded input (`-i`) and to
/// mirror live input to disk (`-o`).
pub struct PhyIoFile {
    file: File,
    mode: PhyIoFileMode,
}

impl PhyIoFile {
    pub fn new<P: AsRef<Path>>(filename: P, mode: PhyIoFileMode) -> io::Result<Self> {
        let file = match mode {
            PhyIoFileMode::Read => OpenOptions::new().read(true).open(&filename)?,
            PhyIoFileMode::Write => OpenOptions::new().write(true).create(true).truncate(true).open(&filename)?,
        };
        Ok(Self { file, mode })
    }

    /// Read up to `buffer.len()` bytes. `Eof` once the file is drained.
    pub fn read_chunk(&mut self, buffer: &mut [u8]) -> Result<usize, PhyIoError> {
        assert!(self.mode == PhyIoFileMode::Read);
        match self.file.read(buffer) {
            Ok(0) => Err(PhyIoError::Eof),
            Ok(n) => Ok(n),
            Err(e) => Err(PhyIoError::from(e)),
        }
    }

    pub fn write_block(&mut self, data: &[u8]) -> Result<(), PhyIoError> {
        if self.mode != PhyIoFileMode::Write {
            return Err(PhyIoError::Io("file not opened for writing".to_string()));
        }
        self.file.write_all(data)?;
        Ok(())
    }

    /// Spawn a background thread owning a write-mode file. Returned sender
    /// queues blocks for writing; `Shutdown` ends the thread.
    pub fn create_async_writer<P: AsRef<Path>>(filename: P, thread_name: String) -> io::Result<Sender<FileWriteMsg>> {
        let mut file = PhyIoFile::new(&filename, PhyIoFileMode::Write)?;
        let (sender, receiver) = unbounded::<FileWriteMsg>();

        thread::Builder::new()
            .name(thread_name)
            .spawn(move || {
                while let Ok(msg) = receiver.recv() {
                    match msg {
                        FileWriteMsg::WriteBlock(data) => {
                            if let Err(e) = file.write_block(&data) {
                                tracing::warn!("mirror write failed: {:?}", e);
                            }
                        }
                        FileWriteMsg::Shutdown => break,
                    }
                }
            })
            .expect("failed to spawn phy-io-writer thread");

        Ok(sender)
    }
}
