use crate::error::SqlConsoleError;
use crate::types::{ConversionMode, ParamConverter, RowValues};

/// Convert bind values with the backend's `ParamConverter`.
pub(crate) fn convert_params<'a, C>(
    params: &'a [RowValues],
    mode: ConversionMode,
) -> Result<<C as ParamConverter<'a>>::Converted, SqlConsoleError>
where
    C: ParamConverter<'a>,
{
    C::convert_sql_params(params, mode)
}
