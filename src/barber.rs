use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::observer::ShopObserver;
use crate::waiting_room::WaitingRoom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarberState {
    /// Esperando que algún cliente avise que está listo.
    Idle,
    Serving,
}

pub struct Barber {
    room: Arc<WaitingRoom>,
    observer: Arc<dyn ShopObserver>,
    haircut: Duration,
    state: BarberState,
    cycles: u64,
}

impl Barber {
    pub fn new(room: Arc<WaitingRoom>, observer: Arc<dyn ShopObserver>, haircut: Duration) -> Self {
        Barber {
            room,
            observer,
            haircut,
            state: BarberState::Idle,
            cycles: 0,
        }
    }

    pub fn state(&self) -> BarberState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Atiende a un cliente completo y devuelve el número de ciclo.
    pub fn serve_one(&mut self) -> Result<u64> {
        debug!("[Barbero] Esperando cliente");
        self.room.customer_ready().wait()?;

        self.state = BarberState::Serving;
        self.cycles += 1;
        let cycle = self.cycles;

        // el cliente que avisó nos pasa el acceso en mano
        let mut seats = self.room.seats().accept_hand_off()?;
        self.observer.on_service_start(cycle);
        thread::sleep(self.haircut);
        let returned = seats.give_back();
        self.observer.on_service_complete(cycle);

        // aunque devolver el asiento falle, el cliente tiene que enterarse
        // y el acceso tiene que soltarse
        let done = self.room.service_done().signal();
        drop(seats);
        self.state = BarberState::Idle;

        returned?;
        done?;
        Ok(cycle)
    }

    /// Loop del barbero. Con `budget` se va después de esa cantidad de cortes;
    /// sin él no termina nunca.
    pub fn run(mut self, budget: Option<u64>) -> Result<u64> {
        loop {
            if let Some(budget) = budget {
                if self.cycles >= budget {
                    debug!("[Barbero] Terminé la jornada ({} cortes)", self.cycles);
                    return Ok(self.cycles);
                }
            }
            self.serve_one()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl ShopObserver for Recorder {
        fn on_service_start(&self, cycle: u64) {
            self.events.lock().unwrap().push(format!("start {}", cycle));
        }
        fn on_service_complete(&self, cycle: u64) {
            self.events.lock().unwrap().push(format!("complete {}", cycle));
        }
    }

    // hace de cliente a mano: reserva, avisa, pasa el acceso y espera el corte
    fn sit_and_wait(room: &WaitingRoom) {
        let mut seats = room.seats().acquire_access().unwrap();
        assert!(seats.try_reserve());
        room.customer_ready().signal().unwrap();
        seats.hand_off();
        room.service_done().wait().unwrap();
    }

    #[test]
    fn serves_one_customer_and_returns_the_seat() {
        let room = Arc::new(WaitingRoom::new(1));
        let recorder = Arc::new(Recorder::default());
        room.open().unwrap();

        let barber = {
            let room = room.clone();
            let recorder = recorder.clone();
            thread::spawn(move || {
                let mut barber = Barber::new(room, recorder, Duration::from_millis(5));
                assert_eq!(barber.state(), BarberState::Idle);
                let cycle = barber.serve_one().unwrap();
                assert_eq!(barber.state(), BarberState::Idle);
                (cycle, barber.cycles())
            })
        };

        sit_and_wait(&room);
        assert_eq!(barber.join().unwrap(), (1, 1));

        let seats = room.seats().acquire_access().unwrap();
        let ledger = seats.ledger();
        assert_eq!(ledger.free_seats, 1);
        assert_eq!((ledger.reserved, ledger.returned), (1, 1));
        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["start 1".to_string(), "complete 1".to_string()]
        );
    }

    #[test]
    fn bounded_run_stops_after_budget() {
        let room = Arc::new(WaitingRoom::new(2));
        room.open().unwrap();

        let barber = {
            let room = room.clone();
            thread::spawn(move || {
                Barber::new(room, Arc::new(Recorder::default()), Duration::ZERO).run(Some(3))
            })
        };

        for _ in 0..3 {
            sit_and_wait(&room);
        }
        assert_eq!(barber.join().unwrap().unwrap(), 3);
    }

    #[test]
    fn zero_budget_never_waits_for_customers() {
        let room = Arc::new(WaitingRoom::new(1));
        let barber = Barber::new(room, Arc::new(Recorder::default()), Duration::ZERO);
        assert_eq!(barber.run(Some(0)).unwrap(), 0);
    }
}
