use futures::channel::mpsc;
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use image::RgbaImage;

use super::Snapshot;
use crate::error::CanvasResult;

/// Identifies one restore request; later requests carry larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RestoreToken(u64);

/// A finished decode waiting to be drawn
pub struct DecodedRestore {
    pub token: RestoreToken,
    pub image: RgbaImage,
}

impl std::fmt::Debug for DecodedRestore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedRestore")
            .field("token", &self.token)
            .field("dimensions", &self.image.dimensions())
            .finish()
    }
}

/// Decodes snapshots on a single-threaded executor.
///
/// An in-flight decode cannot be cancelled. Instead every request bumps the
/// latest token and results carrying an older token are discarded, so a
/// slow decode can never overwrite a newer state.
pub struct RestoreQueue {
    pool: LocalPool,
    spawner: LocalSpawner,
    sender: mpsc::UnboundedSender<DecodedRestore>,
    receiver: mpsc::UnboundedReceiver<DecodedRestore>,
    latest: u64,
}

impl std::fmt::Debug for RestoreQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestoreQueue")
            .field("latest", &self.latest)
            .finish()
    }
}

impl Default for RestoreQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RestoreQueue {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        let (sender, receiver) = mpsc::unbounded();
        Self {
            pool,
            spawner,
            sender,
            receiver,
            latest: 0,
        }
    }

    /// Schedules `snapshot` for decoding and makes it the newest request.
    pub fn submit(&mut self, snapshot: Snapshot) -> CanvasResult<RestoreToken> {
        let token = self.supersede();
        let sender = self.sender.clone();
        self.spawner.spawn_local(async move {
            match snapshot.decode().await {
                Ok(image) => {
                    // The receiver lives as long as the queue
                    let _ = sender.unbounded_send(DecodedRestore { token, image });
                }
                // Never resolves: the surface keeps its current content
                Err(err) => log::error!("Restore {:?} failed to decode: {}", token, err),
            }
        })?;
        Ok(token)
    }

    /// Invalidates every request issued so far.
    pub fn supersede(&mut self) -> RestoreToken {
        self.latest += 1;
        RestoreToken(self.latest)
    }

    pub fn latest(&self) -> RestoreToken {
        RestoreToken(self.latest)
    }

    pub fn is_current(&self, token: RestoreToken) -> bool {
        token.0 == self.latest
    }

    /// Runs pending decodes and returns the newest result that is still current.
    pub fn poll(&mut self) -> Option<DecodedRestore> {
        self.pool.run_until_stalled();
        let mut newest = None;
        while let Ok(decoded) = self.receiver.try_recv() {
            if self.is_current(decoded.token) {
                newest = Some(decoded);
            } else {
                log::debug!("Discarding stale restore {:?}", decoded.token);
            }
        }
        newest
    }
}
