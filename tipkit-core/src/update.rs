use bitflags::bitflags;

bitflags! {
    /// Tells the host what has to be redone after an event was handled.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Update: u8 {
        /// Repaint the tooltip layers.
        const DRAW = 0b0001;
        /// The layer structure changed (popover shown or hidden).
        const LAYOUT = 0b0010;
        /// Everything changed.
        const ALL = Self::DRAW.bits() | Self::LAYOUT.bits();
    }
}
