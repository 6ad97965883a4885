use tracing::{debug, info};

/// Sumidero de eventos de la barbería. Sólo observa: nada de lo que haga
/// puede cambiar el flujo de control de barbero o clientes.
pub trait ShopObserver: Send + Sync {
    fn on_service_start(&self, cycle: u64);
    fn on_service_complete(&self, cycle: u64);

    fn on_seat_reserved(&self, _customer: usize, _free_seats: usize) {}
    fn on_turned_away(&self, _customer: usize) {}
    fn on_served(&self, _customer: usize) {}
}

/// Observador por defecto: todo va a `tracing`.
pub struct TracingObserver;

impl ShopObserver for TracingObserver {
    fn on_service_start(&self, cycle: u64) {
        info!(cycle, "[Barbero] Cortando pelo");
    }

    fn on_service_complete(&self, cycle: u64) {
        info!(cycle, "[Barbero] Terminé corte de pelo");
    }

    fn on_seat_reserved(&self, customer: usize, free_seats: usize) {
        info!(free_seats, "[Cliente {}] Me senté en la sala de espera", customer);
    }

    fn on_turned_away(&self, customer: usize) {
        debug!("[Cliente {}] Sala llena, vuelvo a intentar", customer);
    }

    fn on_served(&self, customer: usize) {
        info!("[Cliente {}] Me terminaron de cortar el cabello", customer);
    }
}
