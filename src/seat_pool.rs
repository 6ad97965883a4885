//! Asientos de la sala de espera y el token de acceso exclusivo.
//!
//! El token vive en un canal de capacidad 1: tomarlo es `recv`, devolverlo es
//! `try_send`. Sólo se puede tocar `free_seats` a través de un [`SeatGuard`],
//! que devuelve el token exactamente una vez al salir de scope.
//!
//! Hay un segundo carril, el de traspaso: el cliente que acaba de avisar al
//! barbero le pasa el token directamente, sin que otro cliente pueda
//! colarse entre la reserva y la atención.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{error, trace};

use crate::error::{Result, ShopError};

/// Foto del estado de los asientos tomada con el acceso en mano.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLedger {
    pub capacity: usize,
    pub free_seats: usize,
    /// Reservas hechas por clientes desde el inicio.
    pub reserved: u64,
    /// Asientos devueltos por el barbero desde el inicio.
    pub returned: u64,
}

impl SeatLedger {
    pub fn outstanding(&self) -> u64 {
        self.reserved - self.returned
    }

    /// reservas == devoluciones + asientos que faltan respecto de la capacidad
    pub fn is_conserved(&self) -> bool {
        self.free_seats <= self.capacity
            && self.outstanding() == (self.capacity - self.free_seats) as u64
    }
}

pub struct SeatPool {
    capacity: usize,
    // las lecturas/escrituras ocurren con el token tomado; el canal ya da el happens-before
    free_seats: AtomicUsize,
    reserved: AtomicU64,
    returned: AtomicU64,
    access_tx: Sender<()>,
    access_rx: Receiver<()>,
    handoff_tx: Sender<()>,
    handoff_rx: Receiver<()>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lane {
    /// Cualquiera que espere en `acquire_access`.
    Pool,
    /// Sólo quien espere en `accept_hand_off`.
    HandOff,
}

impl SeatPool {
    /// Crea el pool con todos los asientos libres y el token NO disponible.
    pub fn new(capacity: usize) -> Self {
        let (access_tx, access_rx) = bounded(1);
        let (handoff_tx, handoff_rx) = bounded(1);
        SeatPool {
            capacity,
            free_seats: AtomicUsize::new(capacity),
            reserved: AtomicU64::new(0),
            returned: AtomicU64::new(0),
            access_tx,
            access_rx,
            handoff_tx,
            handoff_rx,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bloquea hasta obtener el acceso exclusivo. No es reentrante: pedirlo
    /// de nuevo teniendo un guard vivo bloquea para siempre.
    pub fn acquire_access(&self) -> Result<SeatGuard<'_>> {
        self.access_rx
            .recv()
            .map_err(|_| ShopError::Disconnected("seat_access"))?;
        trace!("acceso a asientos tomado");
        Ok(SeatGuard::new(self))
    }

    /// Bloquea hasta recibir el token que otro pasó con [`SeatGuard::hand_off`].
    pub fn accept_hand_off(&self) -> Result<SeatGuard<'_>> {
        self.handoff_rx
            .recv()
            .map_err(|_| ShopError::Disconnected("seat_hand_off"))?;
        trace!("acceso a asientos recibido en mano");
        Ok(SeatGuard::new(self))
    }

    /// Pone el token a disposición de exactamente un adquirente.
    pub(crate) fn release_access(&self) -> Result<()> {
        self.release_into(Lane::Pool)
    }

    fn release_into(&self, lane: Lane) -> Result<()> {
        let (tx, name) = match lane {
            Lane::Pool => (&self.access_tx, "seat_access"),
            Lane::HandOff => (&self.handoff_tx, "seat_hand_off"),
        };
        match tx.try_send(()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(())) => Err(ShopError::DoubleRelease),
            Err(TrySendError::Disconnected(())) => Err(ShopError::Disconnected(name)),
        }
    }
}

/// Acceso exclusivo a los asientos; se libera en `Drop`.
pub struct SeatGuard<'a> {
    pool: &'a SeatPool,
    release_to: Lane,
}

impl<'a> SeatGuard<'a> {
    fn new(pool: &'a SeatPool) -> Self {
        SeatGuard {
            pool,
            release_to: Lane::Pool,
        }
    }

    /// Suelta el acceso directo a quien esté en `accept_hand_off`, en vez de
    /// devolverlo a los que esperan en `acquire_access`.
    pub fn hand_off(mut self) {
        self.release_to = Lane::HandOff;
    }

    pub fn free_seats(&self) -> usize {
        self.pool.free_seats.load(Ordering::Relaxed)
    }

    /// Ocupa un asiento si hay alguno libre.
    pub fn try_reserve(&mut self) -> bool {
        let free = self.free_seats();
        if free == 0 {
            return false;
        }
        self.pool.free_seats.store(free - 1, Ordering::Relaxed);
        self.pool.reserved.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Devuelve el asiento del cliente que se está atendiendo.
    pub fn give_back(&mut self) -> Result<()> {
        let free = self.free_seats();
        if free >= self.pool.capacity {
            return Err(ShopError::SeatOverflow {
                capacity: self.pool.capacity,
            });
        }
        self.pool.free_seats.store(free + 1, Ordering::Relaxed);
        self.pool.returned.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn ledger(&self) -> SeatLedger {
        SeatLedger {
            capacity: self.pool.capacity,
            free_seats: self.free_seats(),
            reserved: self.pool.reserved.load(Ordering::Relaxed),
            returned: self.pool.returned.load(Ordering::Relaxed),
        }
    }
}

impl Drop for SeatGuard<'_> {
    fn drop(&mut self) {
        trace!(lane = ?self.release_to, "acceso a asientos liberado");
        if let Err(e) = self.pool.release_into(self.release_to) {
            error!("no se pudo liberar el acceso a los asientos: {}", e);
        }
    }
}
