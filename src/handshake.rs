//! Señal de handshake: un punto de encuentro sin buffer y sin datos.
//!
//! `signal` se bloquea hasta que alguien hace `wait` y viceversa; cada
//! señal se empareja con exactamente una espera. No es un semáforo: no
//! guarda cuenta ni encola señales pendientes.

use crossbeam::channel::{bounded, Receiver, Sender};

use crate::error::{Result, ShopError};

pub struct Handshake {
    name: &'static str,
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl Handshake {
    pub fn new(name: &'static str) -> Self {
        // capacidad 0 => rendezvous, igual que un canal sin buffer
        let (tx, rx) = bounded(0);
        Handshake { name, tx, rx }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Bloquea hasta que un único receptor toma la señal.
    pub fn signal(&self) -> Result<()> {
        self.tx
            .send(())
            .map_err(|_| ShopError::Disconnected(self.name))
    }

    /// Bloquea hasta que un único emisor entrega la señal.
    pub fn wait(&self) -> Result<()> {
        self.rx.recv().map_err(|_| ShopError::Disconnected(self.name))
    }
}
