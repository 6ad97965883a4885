//! Problema del barbero dormido resuelto sólo con señales de handshake:
//! un barbero, una sala de espera acotada y tantos clientes como se quiera.
//!
//! El contador de asientos libres se protege con un token de acceso que se
//! pasa de mano en mano; `customer_ready` y `service_done` son encuentros
//! punto a punto entre un cliente y el barbero.

mod barber;
mod config;
mod customer;
mod error;
mod handshake;
mod observer;
mod seat_pool;
mod shop;
mod waiting_room;

pub use barber::{Barber, BarberState};
pub use config::{ShopConfig, DEFAULT_CAPACITY};
pub use customer::{Customer, CustomerReport, Visit};
pub use error::{Result, ShopError};
pub use handshake::Handshake;
pub use observer::{ShopObserver, TracingObserver};
pub use seat_pool::{SeatGuard, SeatLedger, SeatPool};
pub use shop::{BarberShop, ShopSummary};
pub use waiting_room::WaitingRoom;
