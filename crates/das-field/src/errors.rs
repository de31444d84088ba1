use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("division by the zero field element")]
    FieldDivisionByZero,
}
