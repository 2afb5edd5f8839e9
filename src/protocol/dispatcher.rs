//! Discriminator-based payload routing.
//!
//! A header field value (the discriminator) selects which decoder parses
//! the remaining byte window. Routes live in a process-wide registry so
//! new encapsulated protocols register themselves at startup without
//! touching existing decoders. An unregistered discriminator is not an
//! error: the payload falls back to the opaque [`RawPacket`] decoder.

use crate::core::packet::{Packet, RawPacket};
use crate::error::{ProtocolError, Result};
use crate::protocol::eap::EapPacket;
use bytes::Bytes;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, trace};

type DecodeFn = dyn Fn(&Bytes, usize, usize) -> Result<Box<dyn Packet>> + Send + Sync + 'static;

/// Payload decoder registry keyed by discriminator raw value.
///
/// Lookups racing registrations observe either the old or the new decoder,
/// never partial state; the fallback path takes no extra locks.
pub struct PacketDispatcher {
    routes: Arc<RwLock<HashMap<u8, Box<DecodeFn>>>>,
}

impl Default for PacketDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketDispatcher {
    /// Create an empty dispatcher with no routes.
    pub fn new() -> Self {
        Self {
            routes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register (or overwrite) the decoder for a discriminator value.
    pub fn register<F>(&self, discriminator: u8, decoder: F) -> Result<()>
    where
        F: Fn(&Bytes, usize, usize) -> Result<Box<dyn Packet>> + Send + Sync + 'static,
    {
        let mut routes = self.routes.write().map_err(|_| {
            ProtocolError::Dispatcher("Failed to acquire write lock on dispatcher".to_string())
        })?;

        routes.insert(discriminator, Box::new(decoder));
        Ok(())
    }

    /// Decode `length` bytes at `offset` with the decoder registered for
    /// `discriminator`, or wrap them opaquely when no route exists.
    ///
    /// The decode itself may still fail (malformed inner header, bad
    /// window); a missing route never does.
    pub fn dispatch(
        &self,
        discriminator: u8,
        raw: &Bytes,
        offset: usize,
        length: usize,
    ) -> Result<Box<dyn Packet>> {
        let routes = self.routes.read().map_err(|_| {
            ProtocolError::Dispatcher("Failed to acquire read lock on dispatcher".to_string())
        })?;

        match routes.get(&discriminator) {
            Some(decoder) => {
                trace!(discriminator, length, "dispatching payload to registered decoder");
                decoder(raw, offset, length)
            }
            None => {
                debug!(
                    discriminator,
                    length, "no decoder registered, wrapping payload opaquely"
                );
                Ok(Box::new(RawPacket::decode(raw, offset, length)?))
            }
        }
    }
}

/// The process-wide dispatcher consulted by the 802.1X decoder.
///
/// Pre-registers exactly one route: packet type `EAP-Packet` (0) decodes
/// as [`EapPacket`]. Every other packet type falls back to an opaque
/// payload.
pub fn default_dispatcher() -> &'static PacketDispatcher {
    static DISPATCHER: Lazy<PacketDispatcher> = Lazy::new(|| {
        let dispatcher = PacketDispatcher::new();
        let registered = dispatcher.register(0, |raw, offset, length| {
            EapPacket::decode(raw, offset, length).map(|p| Box::new(p) as Box<dyn Packet>)
        });
        // a fresh dispatcher's lock cannot be poisoned
        debug_assert!(registered.is_ok());
        dispatcher
    });
    &DISPATCHER
}
