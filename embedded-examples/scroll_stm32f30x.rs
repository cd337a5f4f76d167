//! Full example code for scrolling text across a 4-in-1 MAX7219 module. This runs on an
//! STM32F303RE, with the module's DIN and CLK connected to SPI1 (PA7, PA5) and LOAD to PA8.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate embedded_hal as hal_api;
extern crate max7219_scroll as matrix;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;

use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::prelude::*;
use hal::spi;

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

fn main() -> ! {
    // Get peripherals and set up RCC.
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    // Get GPIO A where the module is connected.
    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);

    // Set up SPI1, which is Alternate Function 5 for GPIOs PA5,6,7. MISO is unused by the chain
    // but the HAL wants all three pins.
    let sck = gpioa.pa5.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let miso = gpioa.pa6.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let mosi = gpioa.pa7.into_af5(&mut gpioa.moder, &mut gpioa.afrl);

    let spi = spi::Spi::spi1(
        dp.SPI1,
        (sck, miso, mosi),
        matrix::interface::spi::MODE,
        matrix::interface::spi::BAUD_RATE_HZ.hz(),
        clocks,
        &mut rcc.apb2,
    );

    // PA8 drives LOAD for every chip in the chain.
    let load = gpioa
        .pa8
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // These 4-in-1 boards have each matrix turned a quarter turn and the input connector on the
    // right-hand side.
    let config = matrix::Config::new(4)
        .rotation(matrix::Rotation::CounterClockwise)
        .intensity(4);
    let mut display = matrix::Display::new(matrix::SpiInterface::new(spi, load), config).unwrap();
    display.init().unwrap();

    loop {
        display
            .scroll_text("Hello, MAX7219!", matrix::StandardFont, 40, 1000, &mut delay)
            .unwrap();
        display
            .display_text("Rust", matrix::StandardFont, 4, true)
            .unwrap();
        delay.delay_ms(2000_u16);
    }
}
