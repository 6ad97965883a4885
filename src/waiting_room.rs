use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::error::{Result, ShopError};
use crate::handshake::Handshake;
use crate::seat_pool::SeatPool;

/// Estado compartido entre el barbero y los clientes: los asientos y las
/// dos señales privadas de cada ciclo de atención.
pub struct WaitingRoom {
    seats: SeatPool,
    customer_ready: Handshake,
    service_done: Handshake,
    opened: AtomicBool,
}

impl WaitingRoom {
    pub fn new(capacity: usize) -> Self {
        WaitingRoom {
            seats: SeatPool::new(capacity),
            customer_ready: Handshake::new("customer_ready"),
            service_done: Handshake::new("service_done"),
            opened: AtomicBool::new(false),
        }
    }

    pub fn seats(&self) -> &SeatPool {
        &self.seats
    }

    pub fn customer_ready(&self) -> &Handshake {
        &self.customer_ready
    }

    pub fn service_done(&self) -> &Handshake {
        &self.service_done
    }

    pub fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    /// Liberación inicial del acceso a los asientos. Sólo puede ocurrir una vez;
    /// hasta entonces nadie puede mirar ni tocar los asientos.
    pub fn open(&self) -> Result<()> {
        if self.opened.swap(true, Ordering::SeqCst) {
            return Err(ShopError::AlreadyOpen);
        }
        self.seats.release_access()?;
        info!("[Barbería] abierta con {} asientos", self.seats.capacity());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_exactly_once() {
        let room = WaitingRoom::new(3);
        assert!(!room.is_open());

        room.open().unwrap();
        assert!(room.is_open());
        assert!(matches!(room.open(), Err(ShopError::AlreadyOpen)));

        // el segundo open no dejó un token extra: tomarlo y soltarlo sigue andando
        {
            let guard = room.seats().acquire_access().unwrap();
            assert_eq!(guard.free_seats(), 3);
        }
        let guard = room.seats().acquire_access().unwrap();
        assert_eq!(guard.ledger().reserved, 0);
    }

    #[test]
    fn handshakes_are_named_after_their_role() {
        let room = WaitingRoom::new(1);
        assert_eq!(room.customer_ready().name(), "customer_ready");
        assert_eq!(room.service_done().name(), "service_done");
    }
}
