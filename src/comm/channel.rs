//! In-process channel backend
//!
//! A world of `P` ranks owns `P * P` unbounded crossbeam channels, one per
//! ordered `(src, dst)` pair. Rank `dst` keeps the receiving end of every
//! channel addressed to it, indexed by `src`, which gives receives their
//! source matching for free.
//!
//! Sends never block. A receive blocks until the peer sends, or fails with
//! [`PrimeError::Disconnected`] once the peer has dropped its endpoint with
//! nothing left in flight.

use super::{CountVector, Communicator, Message};
use crate::error::PrimeError;
use crossbeam::channel::{unbounded, Receiver, Sender};
use tracing::trace;

/// Builder for a fully connected set of channel communicators
pub struct ChannelWorld;

impl ChannelWorld {
    /// Create `workers` connected communicators, element `r` holding rank `r`
    ///
    /// # Example
    ///
    /// ```
    /// use primepulse::comm::{ChannelWorld, Communicator};
    ///
    /// let comms = ChannelWorld::new(3);
    /// assert_eq!(comms.len(), 3);
    /// assert_eq!(comms[2].rank(), 2);
    /// assert_eq!(comms[2].size(), 3);
    /// ```
    pub fn new(workers: usize) -> Vec<ChannelCommunicator> {
        let mut senders: Vec<Vec<Sender<Message>>> =
            (0..workers).map(|_| Vec::with_capacity(workers)).collect();
        let mut receivers: Vec<Vec<Receiver<Message>>> =
            (0..workers).map(|_| Vec::with_capacity(workers)).collect();

        for src in 0..workers {
            for dst in 0..workers {
                let (tx, rx) = unbounded();
                senders[src].push(tx);
                receivers[dst].push(rx);
            }
        }

        senders
            .into_iter()
            .zip(receivers)
            .enumerate()
            .map(|(rank, (outbox, inbox))| ChannelCommunicator {
                rank,
                size: workers,
                outbox,
                inbox,
            })
            .collect()
    }
}

/// One rank's endpoints into a [`ChannelWorld`]
pub struct ChannelCommunicator {
    rank: usize,
    size: usize,
    /// `outbox[dst]` sends to rank `dst`
    outbox: Vec<Sender<Message>>,
    /// `inbox[src]` receives from rank `src`
    inbox: Vec<Receiver<Message>>,
}

impl ChannelCommunicator {
    fn check_peer(&self, peer: usize) -> Result<(), PrimeError> {
        if peer >= self.size {
            return Err(PrimeError::InvalidRank {
                rank: peer,
                workers: self.size,
            });
        }
        Ok(())
    }

    fn post(&self, to: usize, message: Message) -> Result<(), PrimeError> {
        self.check_peer(to)?;
        trace!(
            from = self.rank,
            to,
            payload = %serde_json::to_string(&message).unwrap_or_default(),
            "send"
        );
        self.outbox[to]
            .send(message)
            .map_err(|_| PrimeError::Disconnected { peer: to })
    }

    fn take(&self, from: usize) -> Result<Message, PrimeError> {
        self.check_peer(from)?;
        self.inbox[from]
            .recv()
            .map_err(|_| PrimeError::Disconnected { peer: from })
    }
}

impl Communicator for ChannelCommunicator {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn broadcast(&self, root: usize, value: u64) -> Result<u64, PrimeError> {
        self.check_peer(root)?;
        if self.rank == root {
            for peer in (0..self.size).filter(|&peer| peer != root) {
                self.post(peer, Message::Bound(value))?;
            }
            return Ok(value);
        }

        match self.take(root)? {
            Message::Bound(value) => Ok(value),
            other => Err(PrimeError::UnexpectedMessage {
                from: root,
                expected: "BOUND",
                got: other.kind(),
            }),
        }
    }

    fn all_gather(&self, value: usize) -> Result<CountVector, PrimeError> {
        for peer in (0..self.size).filter(|&peer| peer != self.rank) {
            self.post(peer, Message::Count(value))?;
        }

        let mut counts = Vec::with_capacity(self.size);
        for peer in 0..self.size {
            if peer == self.rank {
                counts.push(value);
                continue;
            }
            match self.take(peer)? {
                Message::Count(count) => counts.push(count),
                other => {
                    return Err(PrimeError::UnexpectedMessage {
                        from: peer,
                        expected: "COUNT",
                        got: other.kind(),
                    })
                }
            }
        }
        Ok(counts)
    }

    fn send(&self, to: usize, primes: Vec<u64>) -> Result<(), PrimeError> {
        self.post(to, Message::Primes(primes))
    }

    fn receive(&self, from: usize, expected: usize) -> Result<Vec<u64>, PrimeError> {
        match self.take(from)? {
            Message::Primes(primes) if primes.len() == expected => Ok(primes),
            Message::Primes(primes) => Err(PrimeError::TransferSizeMismatch {
                from,
                expected,
                actual: primes.len(),
            }),
            other => Err(PrimeError::UnexpectedMessage {
                from,
                expected: "PRIMES",
                got: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_broadcast_reaches_every_rank() {
        let handles: Vec<_> = ChannelWorld::new(4)
            .into_iter()
            .map(|comm| {
                thread::spawn(move || {
                    let value = if comm.rank() == 0 { 97 } else { 0 };
                    comm.broadcast(0, value).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 97);
        }
    }

    #[test]
    fn test_all_gather_in_rank_order() {
        let handles: Vec<_> = ChannelWorld::new(5)
            .into_iter()
            .map(|comm| thread::spawn(move || comm.all_gather(comm.rank() * 10).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec![0, 10, 20, 30, 40]);
        }
    }

    #[test]
    fn test_receive_is_matched_by_source() {
        let mut comms = ChannelWorld::new(3);
        let c2 = comms.pop().unwrap();
        let c1 = comms.pop().unwrap();
        let c0 = comms.pop().unwrap();

        c2.send(0, vec![5, 7]).unwrap();
        c1.send(0, vec![3]).unwrap();

        assert_eq!(c0.receive(1, 1).unwrap(), vec![3]);
        assert_eq!(c0.receive(2, 2).unwrap(), vec![5, 7]);
    }

    #[test]
    fn test_receive_rejects_wrong_length() {
        let mut comms = ChannelWorld::new(2);
        let c1 = comms.pop().unwrap();
        let c0 = comms.pop().unwrap();

        c1.send(0, vec![3, 5, 7]).unwrap();
        assert_eq!(
            c0.receive(1, 2),
            Err(PrimeError::TransferSizeMismatch { from: 1, expected: 2, actual: 3 })
        );
    }

    #[test]
    fn test_receive_rejects_wrong_kind() {
        let mut comms = ChannelWorld::new(2);
        let c1 = comms.pop().unwrap();
        let c0 = comms.pop().unwrap();

        c1.post(0, Message::Count(1)).unwrap();
        let err = c0.receive(1, 0).unwrap_err();
        assert_eq!(err, PrimeError::UnexpectedMessage { from: 1, expected: "PRIMES", got: "COUNT" });
    }

    #[test]
    fn test_dropped_peer_disconnects() {
        let mut comms = ChannelWorld::new(2);
        let c1 = comms.pop().unwrap();
        let c0 = comms.pop().unwrap();

        c1.send(0, vec![3]).unwrap();
        drop(c1);

        // In-flight data is still delivered, then the channel reports the drop
        assert_eq!(c0.receive(1, 1).unwrap(), vec![3]);
        assert_eq!(c0.receive(1, 1), Err(PrimeError::Disconnected { peer: 1 }));
        assert_eq!(c0.send(1, vec![]), Err(PrimeError::Disconnected { peer: 1 }));
    }

    #[test]
    fn test_out_of_range_peer() {
        let comms = ChannelWorld::new(2);
        assert_eq!(
            comms[0].send(2, vec![]),
            Err(PrimeError::InvalidRank { rank: 2, workers: 2 })
        );
    }
}
