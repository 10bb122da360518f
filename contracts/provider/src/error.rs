// Provider error module

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ProviderError {
    // Initialization errors (100-199)
    AlreadyInitialized = 100,
    NotInitialized = 101,

    // Configuration errors (200-299)
    InvalidTickRange = 200,
    InvalidSeedAmount = 201,
    InvalidDeviationLimit = 202,
    DesiredTickOutOfAllowedRange = 203,
    InvalidAmount = 204,

    // Market-condition errors (300-399)
    // Advisory rejections: retry once conditions normalize
    TickDeviationTooBig = 300,
    PriceDeviationTooBig = 301,

    // Resource errors (400-499)
    BalanceLessThanSeed = 400,

    // Lifecycle errors (500-599)
    PositionAlreadyActive = 500,
    NoActivePosition = 501,
    PositionTokenNotReturned = 502,
    ProviderClosed = 503,

    // Authorization errors (600-699)
    NotAdminOrAgent = 600,

    // Arithmetic-domain errors (700-799)
    ZeroBasePrice = 700,
}
