use std::time::Duration;

use crate::error::{Result, ShopError};

pub const DEFAULT_CAPACITY: usize = 3;

#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Asientos de la sala de espera.
    pub capacity: usize,
    /// Cantidad de hilos cliente.
    pub customers: usize,
    /// Duración fija de cada corte.
    pub haircut: Duration,
    /// Espera antes de la liberación inicial del acceso, para que los hilos
    /// lleguen a su primer punto de bloqueo.
    pub grace: Duration,
    /// Tope del back-off aleatorio cuando la sala está llena.
    pub retry_backoff: Duration,
    /// Tope de la pausa aleatoria antes de cada nueva llegada.
    pub arrival_jitter: Duration,
    /// `Some(n)`: cada cliente se va después de `n` cortes y el barbero
    /// atiende `customers * n` ciclos. `None`: corre para siempre.
    pub visits: Option<u64>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            capacity: DEFAULT_CAPACITY,
            customers: 1,
            haircut: Duration::from_secs(1),
            grace: Duration::from_millis(10),
            retry_backoff: Duration::from_millis(5),
            arrival_jitter: Duration::ZERO,
            visits: None,
        }
    }
}

impl ShopConfig {
    pub fn validate(&self) -> Result<()> {
        if self.customers == 0 {
            return Err(ShopError::InvalidConfig(
                "at least one customer is needed".to_string(),
            ));
        }
        // sin asientos nadie se corta nunca el pelo: una corrida acotada no terminaría
        if self.capacity == 0 && self.visits.is_some_and(|v| v > 0) {
            return Err(ShopError::InvalidConfig(
                "a bounded run needs at least one seat".to_string(),
            ));
        }
        Ok(())
    }

    /// Cortes que hará el barbero antes de irse, si la corrida es acotada.
    pub fn barber_budget(&self) -> Option<u64> {
        self.visits.map(|v| v * self.customers as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_problem() {
        let config = ShopConfig::default();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.customers, 1);
        assert_eq!(config.visits, None);
        assert!(config.validate().is_ok());
        assert_eq!(config.barber_budget(), None);
    }

    #[test]
    fn rejects_shop_without_customers() {
        let config = ShopConfig {
            customers: 0,
            ..ShopConfig::default()
        };
        assert!(matches!(config.validate(), Err(ShopError::InvalidConfig(_))));
    }

    #[test]
    fn zero_seats_only_allowed_for_unbounded_runs() {
        let unbounded = ShopConfig {
            capacity: 0,
            ..ShopConfig::default()
        };
        assert!(unbounded.validate().is_ok());

        let bounded = ShopConfig {
            capacity: 0,
            visits: Some(2),
            ..ShopConfig::default()
        };
        assert!(bounded.validate().is_err());
    }

    #[test]
    fn barber_budget_covers_every_visit() {
        let config = ShopConfig {
            customers: 5,
            visits: Some(3),
            ..ShopConfig::default()
        };
        assert_eq!(config.barber_budget(), Some(15));
    }
}
