//! Points Badge Component

use leptos::*;

/// Balance text for the badge; `None` while the balance is unknown.
pub fn format_points(balance: Option<f64>) -> String {
    match balance {
        Some(points) => format!("{:.1} pts", points),
        None => "-- pts".to_string(),
    }
}

/// Current balance pill
#[component]
pub fn PointsBadge(#[prop(into)] balance: Signal<Option<f64>>) -> impl IntoView {
    view! {
        <span class="px-3 py-1 rounded-full bg-primary-600 text-white text-sm font-semibold tabular-nums">
            {move || format_points(balance.get())}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(Some(1520.0)), "1520.0 pts");
        assert_eq!(format_points(Some(12.345)), "12.3 pts");
        assert_eq!(format_points(None), "-- pts");
    }
}
