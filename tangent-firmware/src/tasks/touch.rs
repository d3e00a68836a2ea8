//! Touch sampling task
//!
//! Bridges the XPT2046 front end to the shared touch state. The loop
//! waits on the touch interrupt line with a bounded timeout (so a stop
//! request is observed promptly and a held touch keeps re-sampling),
//! runs one acquisition cycle per wake-up, and publishes or releases
//! under the touch lock.

use defmt::*;
use embassy_rp::peripherals::SPI1;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration, Instant, Timer};

use tangent_display::{TouchSampler, TouchShared};
use tangent_drivers::touch::{AcquisitionCycle, Xpt2046, SAMPLES_PER_CYCLE};
use tangent_hal::{InputPin, WaitInput};
use tangent_hal_rp2350::gpio::{InputLine, OutputLine};
use tangent_hal_rp2350::spi::SpiPort;

/// Bounded interrupt wait, keeps the stop latency low
const IRQ_WAIT_MS: u64 = 100;

/// Settle time between raw triples within one acquisition cycle
const INTER_SAMPLE_MS: u64 = 1;

/// Touch sampling task
///
/// Exactly one instance runs per display. The handles it owns (bus,
/// chip select, interrupt line) stay alive until the loop exits.
#[embassy_executor::task]
pub async fn touch_task(
    mut frontend: Xpt2046<SpiPort<'static, SPI1>, OutputLine<'static>>,
    mut irq: InputLine<'static>,
    shared: &'static TouchShared<CriticalSectionRawMutex>,
    stop: &'static Signal<CriticalSectionRawMutex, ()>,
    mut sampler: TouchSampler,
) {
    info!("Touch sampling task started");

    loop {
        // Idle: wake on the pen-down edge or after the timeout. A held
        // touch produces no new edges, so the timeout also paces
        // re-sampling while pressed.
        let _ = with_timeout(
            Duration::from_millis(IRQ_WAIT_MS),
            irq.wait_for_falling_edge(),
        )
        .await;

        if stop.try_take().is_some() {
            info!("Touch sampling task stopping");
            break;
        }

        if irq.is_low() {
            // Acquiring: up to N triples, weak or zeroed ones dropped.
            // A bus fault mid-cycle just means fewer samples.
            let mut cycle = AcquisitionCycle::new();
            for _ in 0..SAMPLES_PER_CYCLE {
                if let Some(sample) = frontend.sample_once() {
                    cycle.feed(sample);
                }
                Timer::after_millis(INTER_SAMPLE_MS).await;
            }

            // Publishing: filter, calibrate and expose the point
            if let Some((raw_x, raw_y)) = cycle.finish() {
                let now_ms = Instant::now().as_millis();
                sampler.publish_cycle(raw_x, raw_y, shared, now_ms);
                trace!("Touch at raw ({}, {})", raw_x, raw_y);
            }
        } else if shared.is_pressed() {
            // Releasing: clear the pressed flag, drop filter history
            sampler.release(shared);
            trace!("Touch released");
        }
    }
}
