//! Static sample data for screens that are not wired to the backend yet.
//! Nothing here comes from, or is sent to, the API.

#[derive(Debug, Clone, PartialEq)]
pub struct OwnerStats {
    pub total_society: u32,
    pub total_reviews: u32,
    pub total_payment: u32,
    pub last_update: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Done,
    Unpaid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRow {
    pub id: u64,
    pub username: &'static str,
    pub email: &'static str,
    pub price: &'static str,
    pub gender: &'static str,
    pub status: PaymentStatus,
}

/// One line of an order summary, amounts in thousands of rupiah
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub label: &'static str,
    pub amount_k: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleOrder {
    pub title: &'static str,
    pub location: &'static str,
    pub tenant: &'static str,
    pub lines: Vec<OrderLine>,
    /// Progress steps in order, with how far the order has come
    pub steps: Vec<&'static str>,
    pub reached: usize,
}

impl SampleOrder {
    /// Subtotal plus charges minus discount
    pub fn total_k(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| {
                if line.label == "Discount" {
                    -line.amount_k
                } else {
                    line.amount_k
                }
            })
            .sum()
    }
}

pub fn owner_stats() -> OwnerStats {
    OwnerStats {
        total_society: 25,
        total_reviews: 19,
        total_payment: 10,
        last_update: "10 august 2025",
    }
}

pub fn payments() -> Vec<PaymentRow> {
    vec![
        PaymentRow {
            id: 1,
            username: "Atha.diantha",
            email: "athaDiantha@gmail.com",
            price: "500k/month",
            gender: "P",
            status: PaymentStatus::Done,
        },
        PaymentRow {
            id: 2,
            username: "sultansyahir",
            email: "AzuraBaik@gmail.com",
            price: "500k/month",
            gender: "P",
            status: PaymentStatus::Done,
        },
        PaymentRow {
            id: 3,
            username: "valeant",
            email: "rizq.syafriano@gmail.com",
            price: "500k/month",
            gender: "L",
            status: PaymentStatus::Unpaid,
        },
        PaymentRow {
            id: 4,
            username: "keisya",
            email: "keisya8tu@gmail.com",
            price: "500k/month",
            gender: "P",
            status: PaymentStatus::Unpaid,
        },
    ]
}

pub fn sample_order() -> SampleOrder {
    SampleOrder {
        title: "Entire House in Sawojajar",
        location: "Sawojajar, Kota Malang",
        tenant: "Azzuraa",
        lines: vec![
            OrderLine {
                label: "Subtotal",
                amount_k: 500.0,
            },
            OrderLine {
                label: "Charge",
                amount_k: 15.0,
            },
            OrderLine {
                label: "Taxes",
                amount_k: 5.0,
            },
            OrderLine {
                label: "Discount",
                amount_k: 0.0,
            },
        ],
        steps: vec!["Pending", "Process", "Verified Boarding House"],
        reached: 1,
    }
}
