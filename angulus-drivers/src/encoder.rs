//! Quadrature encoder edge dispatch
//!
//! Waits on both encoder channels at once and, for each transition, samples
//! the two levels and feeds the tracker. This is the interrupt-side half of
//! the encoder: it should run on an executor that preempts the display
//! refresh, so LCD busy-waits never delay edge handling.
//!
//! Arming a pin for the next edge discards any edge latched before it. Edges
//! can therefore go unreported in two windows: while the other channel's edge
//! is being handled, and between `on_edge` returning and both pins re-arming.
//! The dispatcher keeps the last levels it accounted for and, on every wake,
//! derives the edges from the difference to the levels it samples now:
//!
//! - one channel differs: one edge on that channel
//! - neither differs: the change reverted before sampling and nets zero
//! - both differ: two edges whose order cannot be observed; they are taken
//!   in the order that continues the last direction of travel, so a missed
//!   pair moves the count by two in that direction
//!
//! An edge that lands in a loss window is counted when the next edge wakes
//! the dispatcher, not before.

use angulus_core::quadrature::{decode, Channel, ChannelSample, Direction, QuadratureTracker};
use angulus_hal::edge::{Edge, EdgeInput};
use embassy_futures::select::select;

/// One observed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeEvent {
    /// Channel that changed
    pub channel: Channel,
    /// Direction of the change on that channel
    pub edge: Edge,
    /// Both levels right after the change
    pub sample: ChannelSample,
}

/// Routes edges from the A and B pins into a [`QuadratureTracker`]
pub struct EdgeDispatcher<A, B> {
    a: A,
    b: B,
    /// Levels as of the last reported edge
    last: ChannelSample,
    /// Direction of the last reported edge
    heading: Direction,
    /// Second edge of a two-channel change
    queued: Option<EdgeEvent>,
}

impl<A: EdgeInput, B: EdgeInput> EdgeDispatcher<A, B> {
    /// Create a dispatcher over the two channel pins
    ///
    /// The current levels become the reference for the first edge.
    pub fn new(a: A, b: B) -> Self {
        let last = ChannelSample::new(a.is_high(), b.is_high());
        Self {
            a,
            b,
            last,
            heading: Direction::Forward,
            queued: None,
        }
    }

    /// Current levels of both channels
    pub fn sample(&self) -> ChannelSample {
        ChannelSample::new(self.a.is_high(), self.b.is_high())
    }

    /// Wait for the next edge on either channel
    pub async fn next_edge(&mut self) -> EdgeEvent {
        if let Some(event) = self.queued.take() {
            return event;
        }

        loop {
            select(self.a.wait_for_any_edge(), self.b.wait_for_any_edge()).await;

            let now = self.sample();
            let a_moved = now.a != self.last.a;
            let b_moved = now.b != self.last.b;

            match (a_moved, b_moved) {
                (false, false) => continue,
                (true, false) => return self.step(Channel::A, now),
                (false, true) => return self.step(Channel::B, now),
                (true, true) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("both channels moved: {} -> {}", self.last, now);

                    let via_b = ChannelSample::new(self.last.a, now.b);
                    let (first, second, via) = if decode(Channel::B, via_b) == self.heading {
                        (Channel::B, Channel::A, via_b)
                    } else {
                        (Channel::A, Channel::B, ChannelSample::new(now.a, self.last.b))
                    };

                    let event = self.step(first, via);
                    self.queued = Some(self.step(second, now));
                    return event;
                }
            }
        }
    }

    /// Wait for one edge and apply it to the tracker
    pub async fn dispatch(&mut self, tracker: &QuadratureTracker) -> EdgeEvent {
        let event = self.next_edge().await;
        tracker.on_edge(event.channel, event.sample);

        #[cfg(feature = "defmt")]
        defmt::trace!("edge {} {}: {}", event.channel, event.edge, tracker.read_position());

        event
    }

    /// Dispatch edges forever
    pub async fn run(&mut self, tracker: &QuadratureTracker) -> ! {
        loop {
            self.dispatch(tracker).await;
        }
    }

    fn step(&mut self, channel: Channel, sample: ChannelSample) -> EdgeEvent {
        self.last = sample;
        self.heading = decode(channel, sample);
        let level = match channel {
            Channel::A => sample.a,
            Channel::B => sample.b,
        };
        EdgeEvent {
            channel,
            edge: Edge::from_level(level),
            sample,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angulus_core::config::RESOLUTION;
    use angulus_hal::InputPin;
    use core::future::poll_fn;
    use core::pin::pin;
    use core::task::Poll;
    use embassy_futures::{block_on, poll_once, yield_now};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Encoder model: channel levels plus the order edges will arrive in
    struct Script {
        a: bool,
        b: bool,
        pending: VecDeque<Channel>,
    }

    struct ScriptedPin {
        channel: Channel,
        script: Rc<RefCell<Script>>,
    }

    impl InputPin for ScriptedPin {
        fn is_high(&self) -> bool {
            let script = self.script.borrow();
            match self.channel {
                Channel::A => script.a,
                Channel::B => script.b,
            }
        }
    }

    impl EdgeInput for ScriptedPin {
        async fn wait_for_any_edge(&mut self) {
            loop {
                {
                    let mut script = self.script.borrow_mut();
                    if script.pending.front() == Some(&self.channel) {
                        script.pending.pop_front();
                        match self.channel {
                            Channel::A => script.a = !script.a,
                            Channel::B => script.b = !script.b,
                        }
                        return;
                    }
                }
                yield_now().await;
            }
        }
    }

    fn scripted(a: bool, b: bool, edges: &[Channel]) -> EdgeDispatcher<ScriptedPin, ScriptedPin> {
        let script = Rc::new(RefCell::new(Script {
            a,
            b,
            pending: edges.iter().copied().collect(),
        }));
        EdgeDispatcher::new(
            ScriptedPin {
                channel: Channel::A,
                script: Rc::clone(&script),
            },
            ScriptedPin {
                channel: Channel::B,
                script,
            },
        )
    }

    fn run_edges(
        dispatcher: &mut EdgeDispatcher<ScriptedPin, ScriptedPin>,
        tracker: &QuadratureTracker,
        n: usize,
    ) -> Vec<EdgeEvent> {
        block_on(async {
            let mut events = Vec::new();
            for _ in 0..n {
                events.push(dispatcher.dispatch(tracker).await);
            }
            events
        })
    }

    #[test]
    fn test_forward_cycle() {
        let tracker = QuadratureTracker::new(RESOLUTION);
        let edges = [Channel::B, Channel::A, Channel::B, Channel::A];
        let mut dispatcher = scripted(false, false, &edges);

        let events = run_edges(&mut dispatcher, &tracker, 4);

        assert_eq!(tracker.read_position(), 4);
        let kinds: Vec<_> = events.iter().map(|e| (e.channel, e.edge)).collect();
        assert_eq!(
            kinds,
            [
                (Channel::B, Edge::Rising),
                (Channel::A, Edge::Rising),
                (Channel::B, Edge::Falling),
                (Channel::A, Edge::Falling),
            ]
        );
        assert_eq!(events[1].sample, ChannelSample::new(true, true));
    }

    #[test]
    fn test_backward_cycle() {
        let tracker = QuadratureTracker::new(RESOLUTION);
        let edges = [Channel::A, Channel::B, Channel::A, Channel::B];
        let mut dispatcher = scripted(false, false, &edges);

        run_edges(&mut dispatcher, &tracker, 4);

        assert_eq!(tracker.read_position(), -4);
    }

    #[test]
    fn test_reversal_returns_to_start() {
        let tracker = QuadratureTracker::new(RESOLUTION);
        let edges = [Channel::B, Channel::A, Channel::A, Channel::B];
        let mut dispatcher = scripted(false, false, &edges);

        let events = run_edges(&mut dispatcher, &tracker, 4);

        assert_eq!(tracker.read_position(), 0);
        assert_eq!(events[2].edge, Edge::Falling);
    }

    #[test]
    fn test_pulled_up_idle() {
        let tracker = QuadratureTracker::new(RESOLUTION);
        let mut dispatcher = scripted(true, true, &[Channel::A]);
        assert_eq!(dispatcher.sample(), ChannelSample::new(true, true));

        let events = run_edges(&mut dispatcher, &tracker, 1);

        assert_eq!(events[0].edge, Edge::Falling);
        assert_eq!(events[0].sample, ChannelSample::new(false, true));
        assert_eq!(tracker.read_position(), -1);
    }

    #[test]
    fn test_wraps_at_half_revolution() {
        let tracker = QuadratureTracker::new(RESOLUTION);
        let edges: Vec<_> = [Channel::A, Channel::B, Channel::A, Channel::B]
            .iter()
            .copied()
            .cycle()
            .take(2049)
            .collect();
        let mut dispatcher = scripted(false, false, &edges);

        run_edges(&mut dispatcher, &tracker, 2049);

        // -2048 is in range, one more backward step wraps to the top
        assert_eq!(tracker.read_position(), 2047);
    }

    /// Pin levels plus one edge latch per channel
    #[derive(Default)]
    struct Bench {
        levels: [bool; 2],
        latched: [bool; 2],
    }

    impl Bench {
        fn toggle(&mut self, channel: Channel) {
            let i = index(channel);
            self.levels[i] = !self.levels[i];
            self.latched[i] = true;
        }
    }

    fn index(channel: Channel) -> usize {
        match channel {
            Channel::A => 0,
            Channel::B => 1,
        }
    }

    /// Pin that clears its edge latch whenever it is armed, as the RP2040
    /// GPIO interrupt path does
    struct LatchingPin {
        channel: Channel,
        bench: Rc<RefCell<Bench>>,
    }

    impl InputPin for LatchingPin {
        fn is_high(&self) -> bool {
            self.bench.borrow().levels[index(self.channel)]
        }
    }

    impl EdgeInput for LatchingPin {
        async fn wait_for_any_edge(&mut self) {
            let i = index(self.channel);
            self.bench.borrow_mut().latched[i] = false;
            poll_fn(|cx| {
                let mut bench = self.bench.borrow_mut();
                if bench.latched[i] {
                    bench.latched[i] = false;
                    Poll::Ready(())
                } else {
                    cx.waker().wake_by_ref();
                    Poll::Pending
                }
            })
            .await
        }
    }

    fn latching() -> (EdgeDispatcher<LatchingPin, LatchingPin>, Rc<RefCell<Bench>>) {
        let bench = Rc::new(RefCell::new(Bench::default()));
        let dispatcher = EdgeDispatcher::new(
            LatchingPin {
                channel: Channel::A,
                bench: Rc::clone(&bench),
            },
            LatchingPin {
                channel: Channel::B,
                bench: Rc::clone(&bench),
            },
        );
        (dispatcher, bench)
    }

    /// Arm both pins, apply `edges` while armed, then finish the dispatch
    fn dispatch_after(
        dispatcher: &mut EdgeDispatcher<LatchingPin, LatchingPin>,
        tracker: &QuadratureTracker,
        bench: &RefCell<Bench>,
        edges: &[Channel],
    ) -> EdgeEvent {
        let mut pending = pin!(dispatcher.dispatch(tracker));
        assert!(poll_once(pending.as_mut()).is_pending());
        for &channel in edges {
            bench.borrow_mut().toggle(channel);
        }
        block_on(pending)
    }

    #[test]
    fn test_both_channels_before_wake_count_twice() {
        let tracker = QuadratureTracker::new(RESOLUTION);
        let (mut dispatcher, bench) = latching();

        let first = dispatch_after(&mut dispatcher, &tracker, &bench, &[Channel::B, Channel::A]);
        assert_eq!(first.channel, Channel::B);
        assert_eq!(first.sample, ChannelSample::new(false, true));
        assert_eq!(tracker.read_position(), 1);

        // The second edge needs no further wake
        let second = poll_once(pin!(dispatcher.dispatch(&tracker)));
        let Poll::Ready(second) = second else {
            panic!("second edge was not queued");
        };
        assert_eq!((second.channel, second.edge), (Channel::A, Edge::Rising));
        assert_eq!(tracker.read_position(), 2);
    }

    #[test]
    fn test_edge_while_disarmed_is_recovered() {
        let tracker = QuadratureTracker::new(RESOLUTION);
        let (mut dispatcher, bench) = latching();

        dispatch_after(&mut dispatcher, &tracker, &bench, &[Channel::B]);
        // A rises after on_edge, before the pins re-arm
        bench.borrow_mut().toggle(Channel::A);
        dispatch_after(&mut dispatcher, &tracker, &bench, &[Channel::B]);
        assert_eq!(tracker.read_position(), 2);

        block_on(dispatcher.dispatch(&tracker));
        assert_eq!(tracker.read_position(), 3);
        assert_eq!(dispatcher.sample(), ChannelSample::new(true, false));
    }

    #[test]
    fn test_reverted_bounce_nets_zero() {
        let tracker = QuadratureTracker::new(RESOLUTION);
        let (mut dispatcher, bench) = latching();

        let event = dispatch_after(
            &mut dispatcher,
            &tracker,
            &bench,
            &[Channel::A, Channel::A, Channel::B],
        );

        assert_eq!(event.channel, Channel::B);
        assert_eq!(tracker.read_position(), 1);
    }

    #[test]
    fn test_missed_pair_continues_backward() {
        let tracker = QuadratureTracker::new(RESOLUTION);
        let (mut dispatcher, bench) = latching();

        dispatch_after(&mut dispatcher, &tracker, &bench, &[Channel::A]);
        assert_eq!(tracker.read_position(), -1);

        bench.borrow_mut().toggle(Channel::B);
        let event = dispatch_after(&mut dispatcher, &tracker, &bench, &[Channel::A]);
        assert_eq!(event.channel, Channel::B);
        block_on(dispatcher.dispatch(&tracker));

        assert_eq!(tracker.read_position(), -3);
    }
}
