//! Card Building Blocks
//!
//! Labelled fields and the progress footer shared by both card kinds.

use leptos::prelude::*;

/// `label: value` line; renders nothing without a value
#[component]
pub fn CardField(label: String, value: Option<String>) -> impl IntoView {
    value.map(|value| {
        view! {
            <span class="font-weight-bold">{label}":"</span>
            " "{value}
            <br/>
        }
    })
}

/// Striped progress bar in the card footer
#[component]
pub fn ProgressBar(percent: u32) -> impl IntoView {
    view! {
        <div class="card-footer">
            <div class="progress">
                <div
                    class="progress-bar progress-bar-striped bg-info"
                    role="progressbar"
                    style=format!("width: {}%;", percent)
                    aria-valuenow=percent.to_string()
                    aria-valuemin="0"
                    aria-valuemax="100"
                >
                    {format!("{}%", percent)}
                </div>
            </div>
        </div>
    }
}

/// `quantity unit`, e.g. `10 szt`
pub fn with_unit(quantity: f64, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{} {}", quantity, unit),
        None => quantity.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_unit() {
        assert_eq!(with_unit(10.0, Some("szt")), "10 szt");
        assert_eq!(with_unit(2.5, None), "2.5");
    }
}
