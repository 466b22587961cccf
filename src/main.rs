#![no_main]
#![no_std]

use core::cell::RefCell;
use core::convert::Infallible;

use cortex_m::interrupt::Mutex;
use cortex_m_rt::entry;
use microbit::{
    Board,
    display::nonblocking::{Display as LedMatrix, GreyscaleImage},
    hal::gpio::{
        Floating, Input, PullUp,
        p0::{P0_02, P0_14, P0_23},
    },
    hal::timer::{Periodic, Timer},
    pac::{self, TIMER0, TIMER1, interrupt},
};

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};

use lattice_life::{
    Config, Display, EventProducer, Grid, Keys, MessageQueue, NoSeedStore, Scheduler, TICK_HZ,
    Ticker, TimerService, hal::MAX_BRIGHTNESS,
};

const ROW_COUNT: usize = 5;
type LEDState = [[u8; ROW_COUNT]; ROW_COUNT];

/// Top-left corner of the part of the playfield the 5x5 matrix shows.
const VIEW_COLUMN: usize = 10;
const VIEW_ROW: usize = 3;

/// Brightest greyscale level of the micro:bit matrix.
const GREYSCALE_MAX: u8 = 9;
/// The nRF timers count at 1 MHz.
const TIMER_HZ: u32 = 1_000_000;

/// Button A, edge pad 0 (to ground), button B.
type Buttons = (
    P0_14<Input<Floating>>,
    P0_02<Input<PullUp>>,
    P0_23<Input<Floating>>,
);

static TIMERS: TimerService = TimerService::new();
static TICKER: Mutex<RefCell<Option<Ticker<'static, Buttons, EventProducer<'static>>>>> =
    Mutex::new(RefCell::new(None));
static TICK_TIMER: Mutex<RefCell<Option<Timer<TIMER1, Periodic>>>> =
    Mutex::new(RefCell::new(None));
static MATRIX: Mutex<RefCell<Option<LedMatrix<TIMER0>>>> = Mutex::new(RefCell::new(None));

/// Shows a 5x5 window of the playfield on the LED matrix.
struct MatrixWindow {
    level: u8,
}

impl MatrixWindow {
    fn new() -> Self {
        MatrixWindow {
            level: GREYSCALE_MAX,
        }
    }

    fn show(state: &LEDState) {
        let image = GreyscaleImage::new(state);
        cortex_m::interrupt::free(|cs| {
            if let Some(matrix) = MATRIX.borrow(cs).borrow_mut().as_mut() {
                matrix.show(&image);
            }
        });
    }
}

impl Display for MatrixWindow {
    type Error = Infallible;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        MatrixWindow::show(&[[0; ROW_COUNT]; ROW_COUNT]);
        Ok(())
    }

    fn send_buffer(&mut self, grid: &Grid) -> Result<(), Self::Error> {
        let mut state: LEDState = [[0; ROW_COUNT]; ROW_COUNT];
        for (row, leds) in state.iter_mut().enumerate() {
            for (col, led) in leds.iter_mut().enumerate() {
                if grid.is_alive(VIEW_COLUMN + col, VIEW_ROW + row) {
                    *led = self.level;
                }
            }
        }
        MatrixWindow::show(&state);
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error> {
        // round up so that level 1 stays visible
        let level = u32::from(level.min(MAX_BRIGHTNESS));
        let max = u32::from(MAX_BRIGHTNESS);
        self.level = ((level * u32::from(GREYSCALE_MAX) + max - 1) / max) as u8;
        Ok(())
    }
}

#[entry]
fn main() -> ! {
    rtt_init_print!();

    let Some(board) = Board::take() else {
        panic!("Couldn't take ownership of the board!");
    };
    let Some(queue) = cortex_m::singleton!(: MessageQueue = MessageQueue::new()) else {
        panic!("event queue already taken");
    };
    let (producer, consumer) = queue.split();

    let config = Config::default();
    let buttons: Buttons = (
        board.buttons.button_a,
        board.edge.e00.into_pullup_input(),
        board.buttons.button_b,
    );
    let ticker = Ticker::new(&TIMERS, Keys::new(config.repeat_delays), buttons, producer);

    let mut tick_timer = Timer::periodic(board.TIMER1);
    tick_timer.enable_interrupt();
    tick_timer.start(TIMER_HZ / TICK_HZ);

    let matrix = LedMatrix::new(board.TIMER0, board.display_pins);

    cortex_m::interrupt::free(move |cs| {
        TICKER.borrow(cs).replace(Some(ticker));
        TICK_TIMER.borrow(cs).replace(Some(tick_timer));
        MATRIX.borrow(cs).replace(Some(matrix));
    });

    let mut scheduler = Scheduler::new(consumer, &TIMERS, MatrixWindow::new(), NoSeedStore, config);
    if let Err(e) = scheduler.start() {
        panic!("startup failed: {}", e);
    }

    unsafe {
        pac::NVIC::unmask(pac::Interrupt::TIMER0);
        pac::NVIC::unmask(pac::Interrupt::TIMER1);
    }
    rprintln!("running at {} Hz", TICK_HZ);

    let Err(e) = scheduler.run(cortex_m::asm::wfi);
    panic!("main loop stopped: {}", e);
}

// Hardware tick: debounce the keys and count down the timers.
#[interrupt]
fn TIMER1() {
    cortex_m::interrupt::free(|cs| {
        if let Some(timer) = TICK_TIMER.borrow(cs).borrow_mut().as_mut() {
            timer.reset_event();
        }
        if let Some(ticker) = TICKER.borrow(cs).borrow_mut().as_mut() {
            ticker.tick();
        }
    });
}

// Drives the LED matrix multiplexing.
#[interrupt]
fn TIMER0() {
    cortex_m::interrupt::free(|cs| {
        if let Some(matrix) = MATRIX.borrow(cs).borrow_mut().as_mut() {
            matrix.handle_display_event();
        }
    });
}
