use super::placeholder::{sample_order, SampleOrder};

fn render(order: &SampleOrder) -> String {
    let mut lines = vec![
        "Your Order".to_string(),
        format!("{} ({})", order.title, order.location),
        format!("Tenant: {}", order.tenant),
        String::new(),
    ];

    for line in &order.lines {
        lines.push(format!("{:<10} {:>8.2}K", line.label, line.amount_k));
    }
    lines.push(format!("{:<10} {:>8.2}K", "Total", order.total_k()));
    lines.push(String::new());

    for (i, step) in order.steps.iter().enumerate() {
        let mark = if i <= order.reached { "[x]" } else { "[ ]" };
        lines.push(format!("{} {}", mark, step));
    }

    lines.join("\n")
}

/// Order tracking. Shows a sample order; bookings are not wired in yet.
pub fn render_order_track() -> String {
    render(&sample_order())
}
