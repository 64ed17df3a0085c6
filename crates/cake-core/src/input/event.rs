use crate::api::types::Flavor;

/// User actions the widget understands.
/// The host page translates DOM events into these.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetInput {
    /// A click on the cake at cake-relative pixel coordinates (x, y).
    Click { x: f32, y: f32 },
    /// The message box was submitted.
    SetMessage(String),
    /// The flavor select changed.
    SelectFlavor(Flavor),
    /// The share button was pressed.
    Share,
    /// The reset button was pressed.
    Reset,
}

impl WidgetInput {
    /// Flavor select change, from the select's value.
    pub fn flavor_tag(tag: &str) -> Self {
        WidgetInput::SelectFlavor(Flavor::from_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavor_tag_maps_through_two_way_choice() {
        assert_eq!(WidgetInput::flavor_tag("vanilla"), WidgetInput::SelectFlavor(Flavor::Vanilla));
        assert_eq!(WidgetInput::flavor_tag("lemon"), WidgetInput::SelectFlavor(Flavor::Chocolate));
    }
}
