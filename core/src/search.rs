use crate::model::SymbolDetail;

/// Case-insensitive substring match over the symbol code and both display names.
pub fn matches(detail: &SymbolDetail, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    [&detail.symbol, &detail.short_name, &detail.long_name]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep the symbols matching `query`, preserving their relative order.
pub fn filter_symbols<'a>(symbols: &'a [SymbolDetail], query: &str) -> Vec<&'a SymbolDetail> {
    symbols
        .iter()
        .filter(|detail| matches(detail, query))
        .collect()
}
