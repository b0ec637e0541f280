//! A simulated LPC controller for exercising the protocol without
//! hardware.
//!
//! The mock models just enough of the register block to act as a
//! well-behaved (or deliberately misbehaving) peer: an idle/finished
//! status word, a write-one-to-clear completion latch, a byte-wide
//! push/pop data port, and a tiny backing store so that a write to an
//! address can be read back — enough for round-trip tests. Every register
//! access is journaled together with the accessing thread, which is what
//! the serialization tests inspect.

use std::collections::{HashMap, VecDeque};
use std::thread::{self, ThreadId};

use lpc_mmio::RegisterBus;
use lpc_regs::{Command, IrqStatus, OpStatus, START_TRANSACTION, offsets};

/// One journaled register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(usize),
    Write(usize, u32),
}

pub struct MockController {
    /// Whether the idle bit reads as set.
    pub idle: bool,
    /// Whether the completion latch sets after the start trigger.
    pub completes: bool,
    /// Whether the finished bit reads as set.
    pub finishes: bool,
    /// Poll intervals requested by the engine.
    pub relax_calls: u32,

    command: u32,
    op_len: u32,
    address: u32,
    irq_pending: bool,
    /// Bytes pushed through the write-data port since the last start.
    staged: Vec<u8>,
    /// Bytes queued for popping through the read-data port.
    response: VecDeque<u8>,
    /// Backing store: last payload written per bus address.
    store: HashMap<u32, Vec<u8>>,
    journal: Vec<(ThreadId, Access)>,
}

impl MockController {
    /// A controller that is idle, completes and finishes every cycle.
    pub fn happy() -> Self {
        Self {
            idle: true,
            completes: true,
            finishes: true,
            relax_calls: 0,
            command: 0,
            op_len: 0,
            address: 0,
            irq_pending: false,
            staged: Vec::new(),
            response: VecDeque::new(),
            store: HashMap::new(),
            journal: Vec::new(),
        }
    }

    /// The journaled accesses, in order, without thread tags.
    pub fn accesses(&self) -> Vec<Access> {
        self.journal.iter().map(|&(_, access)| access).collect()
    }

    /// The full journal including the thread that made each access.
    pub fn journal(&self) -> &[(ThreadId, Access)] {
        &self.journal
    }

    /// The payload last committed to `address`, if any.
    pub fn stored(&self, address: u32) -> Option<&[u8]> {
        self.store.get(&address).map(Vec::as_slice)
    }

    fn record(&mut self, access: Access) {
        self.journal.push((thread::current().id(), access));
    }

    /// Start trigger: commit the staged payload (write cycles) or queue
    /// the response bytes (read cycles), then latch completion.
    fn start(&mut self) {
        let command = Command::from_bits(self.command);
        if command.write() {
            let payload = std::mem::take(&mut self.staged);
            self.store.insert(self.address, payload);
        } else {
            let bytes = self.store.get(&self.address).cloned().unwrap_or_default();
            self.response = bytes
                .into_iter()
                .take(self.op_len as usize)
                .collect();
        }
        if self.completes {
            self.irq_pending = true;
        }
    }
}

impl RegisterBus for MockController {
    fn read32(&mut self, offset: usize) -> u32 {
        self.record(Access::Read(offset));
        match offset {
            offsets::OP_STATUS => OpStatus::new()
                .with_idle(self.idle)
                .with_finished(self.finishes)
                .into_bits(),
            offsets::IRQ_STATUS => IrqStatus::new()
                .with_op_complete(self.irq_pending)
                .into_bits(),
            offsets::READ_DATA => u32::from(self.response.pop_front().unwrap_or(0)),
            _ => 0,
        }
    }

    fn write32(&mut self, offset: usize, value: u32) {
        self.record(Access::Write(offset, value));
        match offset {
            offsets::IRQ_STATUS => {
                if IrqStatus::from_bits(value).op_complete() {
                    self.irq_pending = false;
                }
            }
            offsets::COMMAND => self.command = value,
            offsets::OP_LEN => self.op_len = value,
            offsets::WRITE_DATA => self.staged.push((value & 0xFF) as u8),
            offsets::ADDRESS => self.address = value,
            offsets::START if value == START_TRANSACTION => self.start(),
            _ => {}
        }
    }

    fn relax(&mut self) {
        self.relax_calls += 1;
    }
}
