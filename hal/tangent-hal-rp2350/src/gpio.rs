//! GPIO lines over embassy-rp

use embassy_rp::gpio::{Input, Output};

use tangent_hal::{InputPin, OutputPin, WaitInput};

/// Digital output line implementing `tangent_hal::OutputPin`
pub struct OutputLine<'d> {
    inner: Output<'d>,
}

impl<'d> OutputLine<'d> {
    /// Wrap a configured output pin
    pub fn new(inner: Output<'d>) -> Self {
        Self { inner }
    }
}

impl OutputPin for OutputLine<'_> {
    fn set_high(&mut self) {
        self.inner.set_high();
    }

    fn set_low(&mut self) {
        self.inner.set_low();
    }
}

/// Digital input line implementing `tangent_hal::InputPin` and
/// `tangent_hal::WaitInput`
pub struct InputLine<'d> {
    inner: Input<'d>,
}

impl<'d> InputLine<'d> {
    /// Wrap a configured input pin
    pub fn new(inner: Input<'d>) -> Self {
        Self { inner }
    }
}

impl InputPin for InputLine<'_> {
    fn is_high(&self) -> bool {
        self.inner.is_high()
    }
}

impl WaitInput for InputLine<'_> {
    async fn wait_for_falling_edge(&mut self) {
        self.inner.wait_for_falling_edge().await;
    }
}
