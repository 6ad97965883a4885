use std::sync::Arc;
use std::time::Duration;

use barberia::{BarberShop, ShopConfig, TracingObserver, DEFAULT_CAPACITY};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Barbero dormido: un barbero, una sala de espera con asientos y varios
/// clientes, sincronizados sólo con canales sin buffer.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Asientos en la sala de espera
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
    /// Cantidad de clientes concurrentes
    #[arg(long, default_value_t = 1)]
    customers: usize,
    /// Duración de cada corte, en milisegundos
    #[arg(long, default_value_t = 1000)]
    haircut_ms: u64,
    /// Espera antes de abrir la sala, en milisegundos
    #[arg(long, default_value_t = 10)]
    grace_ms: u64,
    /// Tope del back-off cuando la sala está llena, en milisegundos
    #[arg(long, default_value_t = 5)]
    retry_ms: u64,
    /// Tope de la pausa entre llegadas de un mismo cliente, en milisegundos
    #[arg(long, default_value_t = 0)]
    arrival_ms: u64,
    /// Cortes por cliente; sin este valor la barbería no cierra nunca
    #[arg(long)]
    visits: Option<u64>,
}

impl From<Args> for ShopConfig {
    fn from(args: Args) -> Self {
        ShopConfig {
            capacity: args.capacity,
            customers: args.customers,
            haircut: Duration::from_millis(args.haircut_ms),
            grace: Duration::from_millis(args.grace_ms),
            retry_backoff: Duration::from_millis(args.retry_ms),
            arrival_jitter: Duration::from_millis(args.arrival_ms),
            visits: args.visits,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_thread_names(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ShopConfig::from(Args::parse());
    let shop = BarberShop::open(config, Arc::new(TracingObserver))?;

    // en vez de un loop vacío, esperamos a los hilos
    let summary = shop.join()?;
    for customer in &summary.customers {
        info!(
            "[Cliente {}] {} cortes, {} veces sin lugar",
            customer.id,
            customer.served,
            customer.turned_away
        );
    }
    info!(
        "[Barbero] {} cortes, {} asientos libres",
        summary.cycles,
        summary.ledger.free_seats
    );
    Ok(())
}
