//! Full example code for setting up an SSD1308 display and greeting in two scripts. This runs on
//! an STM32F303RE, using a Grove OLED 0.96" module connected to I2C1 on PB6 (SCL) and PB7 (SDA).

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;
extern crate ssd1308;

use core::fmt::Write;
use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::i2c::I2c;
use hal::prelude::*;
use ssd1308 as oled;

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
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);

    // Set up I2C1, which is Alternate Function 4 for GPIOs PB6,7.
    let mut gpiob = dp.GPIOB.split(&mut rcc.ahb);
    let scl = gpiob.pb6.into_af4(&mut gpiob.moder, &mut gpiob.afrl);
    let sda = gpiob.pb7.into_af4(&mut gpiob.moder, &mut gpiob.afrl);
    let i2c = I2c::i2c1(dp.I2C1, (scl, sda), 400.khz(), clocks, &mut rcc.apb1);

    // The Grove module answers at the default address and has no external VCC, so the charge
    // pump must be on.
    let mut disp = oled::Display::new(oled::I2cInterface::new(i2c));
    disp.init(oled::Config::default().charge_pump(true).contrast(0xCF))
        .unwrap();

    // Box the lower half with a pixel-level drawing. A frame covers the whole panel, so it goes
    // out before the text.
    let mut frame = oled::FrameBuffer::new();
    frame.draw_rect(0, 32, 128, 32, true);
    frame.draw_circle(64, 48, 10, true);
    disp.draw_frame(&frame).unwrap();

    // Latin goes left to right from the cursor.
    disp.set_cursor(0, 0).unwrap();
    write!(disp, "Hello, {}!", "world").unwrap();

    // Arabic is written from the left end of the line; the last character lands first.
    disp.set_cursor(2, 11).unwrap();
    disp.write_arabic("\u{0645}\u{0631}\u{062D}\u{0628}\u{0627}").unwrap();

    loop {
        asm::wfi();
    }
}
