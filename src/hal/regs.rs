//! MSP430FR5739 register map
//!
//! Only the registers the beacon core touches are listed. Addresses follow
//! the device datasheet; odd-addressed port registers are byte wide.

/// Peripheral register identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Register {
    // Special function registers
    Sfrie1,
    Sfrifg1,
    // Watchdog
    Wdtctl,
    // Clock system
    Csctl0,
    Csctl1,
    Csctl2,
    Csctl3,
    Csctl4,
    Csctl5,
    // Digital I/O
    P1Out,
    P1Dir,
    P1Sel0,
    P1Sel1,
    P2Out,
    P2Dir,
    P2Sel0,
    P2Sel1,
    P3Out,
    P3Dir,
    P3Sel0,
    P3Sel1,
    PjOut,
    PjDir,
    PjSel0,
    PjSel1,
    // Timer_A0 (heartbeat)
    Ta0Ctl,
    Ta0Cctl0,
    Ta0R,
    Ta0Ccr0,
    Ta0Ex0,
    // Timer_B0 (symbol)
    Tb0Ctl,
    Tb0Cctl0,
    Tb0R,
    Tb0Ccr0,
    // eUSCI_A0 (GPS UART)
    Uca0Ctlw0,
    Uca0Brw,
    Uca0Mctlw,
    // eUSCI_B0 (RF I2C)
    Ucb0Ctlw0,
    Ucb0Ctlw1,
    Ucb0Brw,
}

impl Register {
    /// Number of registers in the map
    pub const COUNT: usize = 40;

    /// Every register, in declaration order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Sfrie1,
        Self::Sfrifg1,
        Self::Wdtctl,
        Self::Csctl0,
        Self::Csctl1,
        Self::Csctl2,
        Self::Csctl3,
        Self::Csctl4,
        Self::Csctl5,
        Self::P1Out,
        Self::P1Dir,
        Self::P1Sel0,
        Self::P1Sel1,
        Self::P2Out,
        Self::P2Dir,
        Self::P2Sel0,
        Self::P2Sel1,
        Self::P3Out,
        Self::P3Dir,
        Self::P3Sel0,
        Self::P3Sel1,
        Self::PjOut,
        Self::PjDir,
        Self::PjSel0,
        Self::PjSel1,
        Self::Ta0Ctl,
        Self::Ta0Cctl0,
        Self::Ta0R,
        Self::Ta0Ccr0,
        Self::Ta0Ex0,
        Self::Tb0Ctl,
        Self::Tb0Cctl0,
        Self::Tb0R,
        Self::Tb0Ccr0,
        Self::Uca0Ctlw0,
        Self::Uca0Brw,
        Self::Uca0Mctlw,
        Self::Ucb0Ctlw0,
        Self::Ucb0Ctlw1,
        Self::Ucb0Brw,
    ];

    /// Position of this register in [`Register::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Memory-mapped address
    #[must_use]
    pub const fn address(self) -> u16 {
        match self {
            Self::Sfrie1 => 0x0100,
            Self::Sfrifg1 => 0x0102,
            Self::Wdtctl => 0x015C,
            Self::Csctl0 => 0x0160,
            Self::Csctl1 => 0x0162,
            Self::Csctl2 => 0x0164,
            Self::Csctl3 => 0x0166,
            Self::Csctl4 => 0x0168,
            Self::Csctl5 => 0x016A,
            Self::P1Out => 0x0202,
            Self::P1Dir => 0x0204,
            Self::P1Sel0 => 0x020A,
            Self::P1Sel1 => 0x020C,
            Self::P2Out => 0x0203,
            Self::P2Dir => 0x0205,
            Self::P2Sel0 => 0x020B,
            Self::P2Sel1 => 0x020D,
            Self::P3Out => 0x0222,
            Self::P3Dir => 0x0224,
            Self::P3Sel0 => 0x022A,
            Self::P3Sel1 => 0x022C,
            Self::PjOut => 0x0322,
            Self::PjDir => 0x0324,
            Self::PjSel0 => 0x032A,
            Self::PjSel1 => 0x032C,
            Self::Ta0Ctl => 0x0340,
            Self::Ta0Cctl0 => 0x0342,
            Self::Ta0R => 0x0350,
            Self::Ta0Ccr0 => 0x0352,
            Self::Ta0Ex0 => 0x0360,
            Self::Tb0Ctl => 0x03C0,
            Self::Tb0Cctl0 => 0x03C2,
            Self::Tb0R => 0x03D0,
            Self::Tb0Ccr0 => 0x03D2,
            Self::Uca0Ctlw0 => 0x05C0,
            Self::Uca0Brw => 0x05C6,
            Self::Uca0Mctlw => 0x05C8,
            Self::Ucb0Ctlw0 => 0x0640,
            Self::Ucb0Ctlw1 => 0x0642,
            Self::Ucb0Brw => 0x0646,
        }
    }

    /// Digital I/O port registers are 8 bits wide
    #[must_use]
    pub const fn is_byte(self) -> bool {
        matches!(
            self,
            Self::P1Out
                | Self::P1Dir
                | Self::P1Sel0
                | Self::P1Sel1
                | Self::P2Out
                | Self::P2Dir
                | Self::P2Sel0
                | Self::P2Sel1
                | Self::P3Out
                | Self::P3Dir
                | Self::P3Sel0
                | Self::P3Sel1
                | Self::PjOut
                | Self::PjDir
                | Self::PjSel0
                | Self::PjSel1
        )
    }
}

/// Special function register bits
pub mod sfr {
    /// Oscillator fault interrupt enable (SFRIE1)
    pub const OFIE: u16 = 0x0002;
    /// Oscillator fault interrupt flag (SFRIFG1)
    pub const OFIFG: u16 = 0x0002;
}

/// Watchdog timer bits
pub mod wdt {
    /// Write password
    pub const WDTPW: u16 = 0x5A00;
    /// Stop the watchdog
    pub const WDTHOLD: u16 = 0x0080;
    /// Clear the watchdog counter
    pub const WDTCNTCL: u16 = 0x0008;
    /// Clock source: ACLK
    pub const WDTSSEL_1: u16 = 0x0020;
    /// Interval: source / 2^27
    pub const WDTIS_1: u16 = 0x0001;
}

/// Clock system bits
pub mod cs {
    /// Unlock key, written to the high byte of CSCTL0
    pub const CSKEY: u16 = 0xA500;

    /// DCO frequency select 0 (5.33 MHz nominal, low range)
    pub const DCOFSEL_0: u16 = 0x0000;

    /// ACLK source: DCOCLK
    pub const SELA_DCOCLK: u16 = 0x0300;
    /// SMCLK source: XT1CLK
    pub const SELS_XT1CLK: u16 = 0x0000;
    /// MCLK source: DCOCLK
    pub const SELM_DCOCLK: u16 = 0x0003;

    /// ACLK divider /2
    pub const DIVA_2: u16 = 0x0100;
    /// SMCLK divider /32
    pub const DIVS_32: u16 = 0x0050;
    /// MCLK divider /4
    pub const DIVM_4: u16 = 0x0002;

    /// XT1 off
    pub const XT1OFF: u16 = 0x0001;
    /// XT1 bypass (external clock on XIN)
    pub const XT1BYPASS: u16 = 0x0010;
    /// XT1 high-frequency mode
    pub const XTS: u16 = 0x0020;
    /// XT2 off
    pub const XT2OFF: u16 = 0x0100;

    /// XT1 oscillator fault flag (CSCTL5)
    pub const XT1OFFG: u16 = 0x0001;
}

/// Timer_A / Timer_B control bits (identical layout on both)
pub mod timer {
    /// Clock source: ACLK
    pub const TASSEL_1: u16 = 0x0100;
    /// Clock source: SMCLK
    pub const TASSEL_2: u16 = 0x0200;
    /// Continuous mode
    pub const MC_2: u16 = 0x0020;
    /// Input divider /8
    pub const ID_3: u16 = 0x00C0;
    /// Clear counter and divider logic
    pub const TACLR: u16 = 0x0004;
    /// Capture/compare interrupt enable
    pub const CCIE: u16 = 0x0010;
    /// Extended input divider /8 (TAxEX0)
    pub const TAIDEX_7: u16 = 0x0007;
}

/// eUSCI_A UART bits
pub mod uart {
    /// Software reset enable
    pub const UCSWRST: u16 = 0x0001;
    /// Clock source: ACLK
    pub const UCSSEL_1: u16 = 0x0040;
    /// Oversampling mode (UCAxMCTLW)
    pub const UCOS16: u16 = 0x0001;
}

/// eUSCI_B I2C bits
pub mod i2c {
    /// Software reset enable
    pub const UCSWRST: u16 = 0x0001;
    /// Clock source: ACLK
    pub const UCSSEL_1: u16 = 0x0040;
    /// Synchronous mode
    pub const UCSYNC: u16 = 0x0100;
    /// eUSCI mode: I2C
    pub const UCMODE_3: u16 = 0x0600;
    /// Master mode
    pub const UCMST: u16 = 0x0800;
    /// Automatic STOP after byte counter threshold (UCBxCTLW1)
    pub const UCASTP_2: u16 = 0x0008;
}
