pub mod adapters;
pub mod chemistry;
pub mod error;
pub mod models;
pub mod services;
pub mod validators;

pub use crate::adapters::form::Form;
pub use crate::error::{
    AppError, CalcError, ConcentrationError, ConversionError, NeubauerError, PhError,
    UnknownToken, ValidationError,
};
pub use crate::models::{
    CalculationType, ConcentrationRequest, ConcentrationResult, ConversionRequest,
    ConversionResult, NeubauerRequest, NeubauerResult, PhCalculationType, PhRequest, PhResult,
    Settings, TypeOption, UnitType,
};
pub use crate::services::concentration::{
    ConcentrationInput, DilutionInput, MassVolumeInput, MolalityInput, MolarityInput,
    PercentageInput, PpmInput,
};
