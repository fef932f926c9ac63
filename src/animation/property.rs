/// Animatable scalar property of a panel or text element.
///
/// Every property is a plain `f64`; gradients and visibility are carried as numeric parameters
/// and formatted by the host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Property {
    /// Horizontal translation in pixels.
    X,
    /// Vertical translation in pixels.
    Y,
    /// Box width in pixels.
    Width,
    /// Box height in pixels.
    Height,
    /// Rotation in degrees. Unbounded; accumulates across turns.
    Rotation,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Combined opacity + visibility toggle (`0` hides the element entirely).
    AutoAlpha,
    /// Horizontal anchor as a percentage of the viewport width.
    Left,
    /// Linear-gradient angle in degrees.
    GradientAngle,
    /// Mix between the two lead colours of the panel gradient (`0` pink, `1` blush).
    GradientLead,
    /// Position of the final (black) gradient stop, in percent.
    GradientStop,
}

impl Property {
    /// Value assumed for a property nothing has written yet.
    pub fn default_value(self) -> f64 {
        match self {
            Self::X | Self::Y | Self::Width | Self::Height | Self::Rotation => 0.0,
            Self::Opacity | Self::AutoAlpha => 1.0,
            Self::Left => 50.0,
            Self::GradientAngle => 90.0,
            Self::GradientLead => 1.0,
            Self::GradientStop => 100.0,
        }
    }
}
