use serde::Serialize;

use crate::property::PropertyRecord;

/// Label anchor offset in pixels for an ordinary marker.
pub const NORMAL_OFFSET: (i32, i32) = (-15, -20);
/// Offset for the selected marker's label.
pub const EMPHASIZED_OFFSET: (i32, i32) = (-10, -20);

/// Name badge drawn for one property marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerIcon {
    pub label: String,
    pub emphasized: bool,
    pub offset: (i32, i32),
}

impl MarkerIcon {
    #[must_use]
    pub fn for_property(property: &PropertyRecord, selected: bool) -> Self {
        Self {
            label: property.name.clone(),
            emphasized: selected,
            offset: if selected {
                EMPHASIZED_OFFSET
            } else {
                NORMAL_OFFSET
            },
        }
    }

    /// CSS transform applied to the badge element.
    #[must_use]
    pub fn transform(&self) -> String {
        format!("translate({}px, {}px)", self.offset.0, self.offset.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::fixtures::property;

    #[test]
    fn selected_marker_is_emphasized() {
        let p = property(1);
        let icon = MarkerIcon::for_property(&p, true);
        assert!(icon.emphasized);
        assert_eq!(icon.transform(), "translate(-10px, -20px)");

        let icon = MarkerIcon::for_property(&p, false);
        assert!(!icon.emphasized);
        assert_eq!(icon.offset, NORMAL_OFFSET);
        assert_eq!(icon.label, "Project 1");
    }
}
