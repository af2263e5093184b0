//! Model-based testing of a bounded FIFO queue
//!
//! The queue stores its elements in a ring with one slot per element, so a
//! full queue cannot be told apart from an empty one. The model is a plain
//! `VecDeque`; falsify generates put/get/len sequences and shrinks the first
//! divergence down to a handful of commands.

use falsify::*;
use std::collections::VecDeque;
use std::fmt;

const CAPACITY: usize = 3;

struct RingQueue {
    slots: Vec<i64>,
    head: usize,
    tail: usize,
}

impl RingQueue {
    fn new(capacity: usize) -> Self {
        RingQueue {
            slots: vec![0; capacity],
            head: 0,
            tail: 0,
        }
    }

    fn put(&mut self, value: i64) {
        self.slots[self.tail] = value;
        self.tail = (self.tail + 1) % self.slots.len();
    }

    fn get(&mut self) -> i64 {
        let value = self.slots[self.head];
        self.head = (self.head + 1) % self.slots.len();
        value
    }

    fn len(&self) -> usize {
        (self.tail + self.slots.len() - self.head) % self.slots.len()
    }
}

#[derive(Debug, Clone)]
struct QueueModel {
    capacity: usize,
    items: VecDeque<i64>,
}

#[derive(Debug, Clone, PartialEq)]
enum QueueCommand {
    Put(i64),
    Get,
    Len,
}

impl fmt::Display for QueueCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueCommand::Put(value) => write!(f, "put({value})"),
            QueueCommand::Get => write!(f, "get"),
            QueueCommand::Len => write!(f, "len"),
        }
    }
}

impl Command for QueueCommand {
    type Model = QueueModel;
    type Real = RingQueue;

    fn check(&self, model: &QueueModel) -> bool {
        match self {
            QueueCommand::Put(_) => model.items.len() < model.capacity,
            QueueCommand::Get => !model.items.is_empty(),
            QueueCommand::Len => true,
        }
    }

    fn apply(&self, model: &mut QueueModel) {
        match self {
            QueueCommand::Put(value) => model.items.push_back(*value),
            QueueCommand::Get => {
                model.items.pop_front();
            }
            QueueCommand::Len => {}
        }
    }

    fn run(&self, model: &QueueModel, real: &mut RingQueue) -> Result<(), String> {
        match self {
            QueueCommand::Put(value) => real.put(*value),
            QueueCommand::Get => {
                let got = real.get();
                if model.items.front() != Some(&got) {
                    return Err(format!("got {got}, expected {:?}", model.items.front()));
                }
            }
            QueueCommand::Len => {
                if real.len() != model.items.len() {
                    return Err(format!(
                        "len is {}, expected {}",
                        real.len(),
                        model.items.len()
                    ));
                }
            }
        }
        Ok(())
    }
}

fn empty_model() -> QueueModel {
    QueueModel {
        capacity: CAPACITY,
        items: VecDeque::new(),
    }
}

fn main() {
    println!("=== Bounded Queue Model-Based Testing ===\n");

    let put = Gen::int_range(-100, 100)
        .expect("valid range")
        .map(QueueCommand::Put, |command| match command {
            QueueCommand::Put(value) => Some(*value),
            _ => None,
        });
    let sequences = commands_with_model(
        empty_model,
        vec![put, Gen::constant(QueueCommand::Get), Gen::constant(QueueCommand::Len)],
        50,
    )
    .expect("valid command generator");

    println!("Sample sequence: {}\n", sequences.sample(7));

    let prop = property(sequences, |sequence| {
        model_run(|| (empty_model(), RingQueue::new(CAPACITY)), sequence)
    });

    let result = prop.check(&Config::default().with_seed(7));
    println!("{result}");

    match prop.assert(&Config::default().with_tests(500)) {
        Ok(()) => println!("\nNo divergence found"),
        Err(error) => println!("\nassert reported the same bug:\n{error}"),
    }
}
