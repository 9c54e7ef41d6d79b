// 💼 Salesperson Entity

use super::EmployeeCore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salesperson {
    pub core: EmployeeCore,
    /// Non-negative, at most two fractional digits
    pub annual_revenue: Decimal,
    /// 0..=100
    pub performance: u8,
}

impl Salesperson {
    pub fn new(core: EmployeeCore, annual_revenue: Decimal, performance: u8) -> Self {
        Salesperson {
            core,
            annual_revenue,
            performance,
        }
    }
}
