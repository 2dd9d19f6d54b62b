// src/common/clock.rs

use chrono::{Local, NaiveDate, NaiveDateTime};

// Relógio injetado: o dashboard depende de "hoje", e os testes precisam fixar isso.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Hora local do processo. Grava `created_at`/`updated_at` (TIMESTAMP sem fuso)
/// e define o "hoje" do dashboard, então os dois nunca divergem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
