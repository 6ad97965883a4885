use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::{thread_rng, Rng};
use tracing::debug;

use crate::error::Result;
use crate::observer::ShopObserver;
use crate::waiting_room::WaitingRoom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Served,
    /// La sala estaba llena; se soltó el acceso sin avisar al barbero.
    TurnedAway,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerReport {
    pub id: usize,
    pub served: u64,
    pub turned_away: u64,
}

pub struct Customer {
    id: usize,
    room: Arc<WaitingRoom>,
    observer: Arc<dyn ShopObserver>,
    retry_backoff: Duration,
    arrival_jitter: Duration,
    served: u64,
    turned_away: u64,
}

impl Customer {
    pub fn new(id: usize, room: Arc<WaitingRoom>, observer: Arc<dyn ShopObserver>) -> Self {
        Customer {
            id,
            room,
            observer,
            retry_backoff: Duration::ZERO,
            arrival_jitter: Duration::ZERO,
            served: 0,
            turned_away: 0,
        }
    }

    pub fn with_pauses(mut self, retry_backoff: Duration, arrival_jitter: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self.arrival_jitter = arrival_jitter;
        self
    }

    pub fn report(&self) -> CustomerReport {
        CustomerReport {
            id: self.id,
            served: self.served,
            turned_away: self.turned_away,
        }
    }

    /// Un intento de corte: entra, mira los asientos y o bien se sienta y
    /// espera al barbero, o bien se va porque no hay lugar.
    pub fn visit(&mut self) -> Result<Visit> {
        let mut seats = self.room.seats().acquire_access()?;
        if !seats.try_reserve() {
            drop(seats);
            self.turned_away += 1;
            self.observer.on_turned_away(self.id);
            self.back_off();
            return Ok(Visit::TurnedAway);
        }

        self.observer.on_seat_reserved(self.id, seats.free_seats());
        // el aviso sale con el acceso todavía tomado, después de la reserva,
        // y el acceso pasa directo al barbero
        self.room.customer_ready().signal()?;
        seats.hand_off();

        self.room.service_done().wait()?;
        self.served += 1;
        self.observer.on_served(self.id);
        Ok(Visit::Served)
    }

    /// Loop del cliente: cada corte terminado es una nueva llegada. Con
    /// `visits` se va después de esa cantidad de cortes.
    pub fn run(mut self, visits: Option<u64>) -> Result<CustomerReport> {
        loop {
            if let Some(visits) = visits {
                if self.served >= visits {
                    debug!("[Cliente {}] Me voy de la barbería", self.id);
                    return Ok(self.report());
                }
            }
            if self.visit()? == Visit::Served {
                self.pause_before_arrival();
            }
        }
    }

    fn back_off(&self) {
        thread::yield_now();
        random_sleep(self.retry_backoff);
    }

    fn pause_before_arrival(&self) {
        random_sleep(self.arrival_jitter);
    }
}

fn random_sleep(max: Duration) {
    let max_micros = max.as_micros() as u64;
    if max_micros == 0 {
        return;
    }
    let micros = thread_rng().gen_range(0..=max_micros);
    thread::sleep(Duration::from_micros(micros));
}
