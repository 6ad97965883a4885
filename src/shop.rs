//! Arranque de la barbería: lanza al barbero y a los clientes, abre la sala
//! una única vez y espera a que todos terminen.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::info;

use crate::barber::Barber;
use crate::config::ShopConfig;
use crate::customer::{Customer, CustomerReport};
use crate::error::{Result, ShopError};
use crate::observer::ShopObserver;
use crate::seat_pool::SeatLedger;
use crate::waiting_room::WaitingRoom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopSummary {
    pub cycles: u64,
    pub customers: Vec<CustomerReport>,
    pub ledger: SeatLedger,
}

pub struct BarberShop {
    room: Arc<WaitingRoom>,
    barber: JoinHandle<Result<u64>>,
    customers: Vec<JoinHandle<Result<CustomerReport>>>,
}

impl BarberShop {
    pub fn open(config: ShopConfig, observer: Arc<dyn ShopObserver>) -> Result<Self> {
        config.validate()?;
        let room = Arc::new(WaitingRoom::new(config.capacity));

        let barber = {
            let barber = Barber::new(room.clone(), observer.clone(), config.haircut);
            let budget = config.barber_budget();
            thread::Builder::new()
                .name("barbero".to_string())
                .spawn(move || barber.run(budget))?
        };

        let customers = (1..=config.customers)
            .map(|id| {
                let customer = Customer::new(id, room.clone(), observer.clone())
                    .with_pauses(config.retry_backoff, config.arrival_jitter);
                let visits = config.visits;
                thread::Builder::new()
                    .name(format!("cliente-{}", id))
                    .spawn(move || customer.run(visits))
            })
            .collect::<std::io::Result<Vec<_>>>()?;

        // dejamos que todos lleguen a su primer bloqueo antes de abrir la sala
        thread::sleep(config.grace);
        room.open()?;
        info!(
            "[Barbería] {} clientes, {} asientos",
            config.customers,
            config.capacity
        );

        Ok(BarberShop {
            room,
            barber,
            customers,
        })
    }

    pub fn room(&self) -> &Arc<WaitingRoom> {
        &self.room
    }

    /// Espera a todos los hilos. En una corrida sin límite de visitas no
    /// vuelve nunca.
    pub fn join(self) -> Result<ShopSummary> {
        let customers = self
            .customers
            .into_iter()
            .map(join_worker)
            .collect::<Result<Vec<_>>>()?;
        let cycles = join_worker(self.barber)?;

        let ledger = self.room.seats().acquire_access()?.ledger();
        info!(
            cycles,
            free_seats = ledger.free_seats,
            "[Barbería] cerrada"
        );
        Ok(ShopSummary {
            cycles,
            customers,
            ledger,
        })
    }
}

fn join_worker<T>(handle: JoinHandle<Result<T>>) -> Result<T> {
    let name = handle.thread().name().unwrap_or("worker").to_string();
    handle
        .join()
        .map_err(|_| ShopError::WorkerPanicked(name))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::TracingObserver;
    use std::time::Duration;

    #[test]
    fn rejects_invalid_config_before_spawning() {
        let config = ShopConfig {
            customers: 0,
            ..ShopConfig::default()
        };
        assert!(matches!(
            BarberShop::open(config, Arc::new(TracingObserver)),
            Err(ShopError::InvalidConfig(_))
        ));
    }

    #[test]
    fn room_cannot_be_opened_again_after_bootstrap() {
        let config = ShopConfig {
            capacity: 1,
            haircut: Duration::ZERO,
            visits: Some(1),
            ..ShopConfig::default()
        };
        let shop = BarberShop::open(config, Arc::new(TracingObserver)).unwrap();
        assert!(shop.room().is_open());
        assert!(matches!(shop.room().open(), Err(ShopError::AlreadyOpen)));

        let summary = shop.join().unwrap();
        assert_eq!(summary.cycles, 1);
        assert_eq!(summary.customers[0].served, 1);
    }

    #[test]
    fn panicked_worker_is_reported_by_name() {
        let handle = thread::Builder::new()
            .name("cliente-7".to_string())
            .spawn(|| -> Result<()> { panic!("boom") })
            .unwrap();
        match join_worker(handle) {
            Err(ShopError::WorkerPanicked(name)) => assert_eq!(name, "cliente-7"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
