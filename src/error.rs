use thiserror::Error;

/// Raw form input that could not be turned into a usable value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The field '{field}' must not be empty")]
    Empty { field: String },

    #[error("The field '{field}' must be a valid number")]
    NotANumber { field: String },

    #[error("The field '{field}' must not be negative")]
    Negative { field: String },

    #[error("The field '{field}' must be a valid whole number")]
    NotAnInteger { field: String },

    #[error("The field '{field}' must be greater than zero")]
    NotPositive { field: String },

    #[error("The field '{field}' is required")]
    Required { field: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unsupported conversion: {from_unit} to {to_unit} for unit type '{unit_type}'")]
    UnsupportedPair {
        from_unit: String,
        to_unit: String,
        unit_type: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConcentrationError {
    /// The provided quantities match none of the accepted combinations.
    #[error("Insufficient parameters for {mode}. Provide {accepted}")]
    InsufficientParameters {
        mode: &'static str,
        accepted: &'static str,
    },

    #[error("Dilution needs exactly 3 of the 4 parameters C1, V1, C2, V2 (got {provided})")]
    DilutionArity { provided: usize },

    #[error("{quantity} must be greater than 0")]
    NonPositive { quantity: &'static str },

    #[error("All dilution values must be greater than 0")]
    NonPositiveDilution,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NeubauerError {
    #[error("The number of quadrants must be greater than 0")]
    NonPositiveQuadrants,

    #[error("The quadrant volume must be greater than 0")]
    NonPositiveQuadrantVolume,

    #[error("The dilution factor must be greater than 0")]
    NonPositiveDilutionFactor,

    #[error("The number of counts ({counts}) does not match the number of quadrants ({quadrants})")]
    CountMismatch { counts: usize, quadrants: i64 },

    #[error("Cell counts cannot be negative (quadrant {quadrant})")]
    NegativeCount { quadrant: usize },

    #[error("Neubauer calculation failed: {0}")]
    Calculation(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhError {
    #[error("The molar concentration of the solution is required")]
    MissingConcentration,

    #[error("The concentration must be greater than zero")]
    NonPositiveConcentration,

    #[error("The number of equivalents must be greater than zero")]
    NonPositiveEquivalents,

    #[error("The concentration is too high for a reliable calculation")]
    ConcentrationTooHigh,

    #[error("Could not compute the ionic equilibrium of the solution")]
    IonicEquilibrium,
}

/// Every failure a calculation engine can report, grouped by kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Concentration(#[from] ConcentrationError),

    #[error(transparent)]
    Neubauer(#[from] NeubauerError),

    #[error(transparent)]
    Ph(#[from] PhError),
}

/// A discriminant token that is not part of the published value set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{token}'")]
pub struct UnknownToken {
    pub kind: &'static str,
    pub token: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[cfg(feature = "cli")]
    #[error("Error reading from stdin: {source}")]
    ReadStdin {
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Error reading file '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Invalid JSON for --form-json: {source}")]
    ParseFormJson {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Invalid JSON in input document: {source}")]
    ParseInputDocument {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Invalid JSON for --settings-json: {source}")]
    ParseSettingsJson {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Could not serialize output to JSON: {source}")]
    SerializeOutput {
        #[source]
        source: serde_json::Error,
    },

    #[cfg(feature = "cli")]
    #[error("Missing input data: provide --field, --form-json or --input")]
    MissingInputData,

    #[cfg(feature = "cli")]
    #[error("Form fields must look like KEY=VALUE, got '{0}'")]
    MalformedField(String),

    #[error(transparent)]
    UnknownToken(#[from] UnknownToken),

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("Unexpected error: {0}")]
    Other(String),
}

pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred. Please try again.";

impl AppError {
    /// Text shown to the user: known failures verbatim, anything else generic.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Other(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

macro_rules! app_error_from_calc {
    ($($kind:ty),* $(,)?) => {
        $(
            impl From<$kind> for AppError {
                fn from(e: $kind) -> Self {
                    AppError::Calc(CalcError::from(e))
                }
            }
        )*
    };
}

app_error_from_calc!(
    ValidationError,
    ConversionError,
    ConcentrationError,
    NeubauerError,
    PhError,
);
