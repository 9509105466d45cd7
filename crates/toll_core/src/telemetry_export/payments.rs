use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::Schema;

use crate::ledger::Account;

use super::utils::{
    f64_field, nullable_u64_field, nullable_utf8_field, u64_field, utf8_field, write_record_batch,
};

/// One row per payment, in ledger order; `seq` is the log position.
pub fn write_payments_parquet<P: AsRef<Path>>(
    path: P,
    account: &Account,
) -> Result<(), Box<dyn Error>> {
    let payments = account.payments();
    let mut seq = Vec::with_capacity(payments.len());
    let mut tick = Vec::with_capacity(payments.len());
    let mut vehicle = Vec::with_capacity(payments.len());
    let mut vendor = Vec::with_capacity(payments.len());
    let mut amount = Vec::with_capacity(payments.len());

    for (index, payment) in payments.into_iter().enumerate() {
        seq.push(index as u64);
        tick.push(payment.tick);
        vehicle.push(payment.vehicle);
        vendor.push(payment.vendor);
        amount.push(payment.amount);
    }

    let schema = Schema::new(vec![
        u64_field("seq"),
        nullable_u64_field("tick"),
        nullable_utf8_field("vehicle"),
        utf8_field("vendor"),
        f64_field("amount"),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(seq)),
        Arc::new(UInt64Array::from(tick)),
        Arc::new(StringArray::from(vehicle)),
        Arc::new(StringArray::from(vendor)),
        Arc::new(Float64Array::from(amount)),
    ];

    write_record_batch(path, schema, arrays)
}
