// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    nil = { Value::Nil, QueueOptions::new() },
    single_string = { Value::from("single_step"), QueueOptions::new().single_step() },
    list_of_one = { Value::list(["strict_order"]), QueueOptions::new().strict_order() },
    list_of_both = {
        Value::list(["strict_order", "single_step"]),
        QueueOptions::new().strict_order().single_step()
    },
    empty_list = { Value::list(Vec::<Value>::new()), QueueOptions::new() },
)]
fn accepted_option_shapes(value: Value, expected: QueueOptions) {
    assert_eq!(QueueOptions::try_from(value).unwrap(), expected);
}

#[parameterized(
    unknown_string = { Value::from("fast") },
    unknown_in_list = { Value::list(["strict_order", "fast"]) },
    number = { Value::from(1i64) },
    boolean = { Value::from(true) },
    nested_list = { Value::List(vec![Value::list(["strict_order"])]) },
    table = { Value::table([("strict_order", true)]) },
)]
fn rejected_option_shapes(value: Value) {
    let err = QueueOptions::try_from(value).unwrap_err();
    assert!(matches!(err, QueueError::InvalidArgument(_)), "{err}");
}

#[test]
fn options_round_trip_through_names() {
    for option in [QueueOption::StrictOrder, QueueOption::SingleStep] {
        assert_eq!(option.as_str().parse::<QueueOption>().unwrap(), option);
    }
}

#[test]
fn display_lists_members_in_canonical_order() {
    let options: QueueOptions = [QueueOption::SingleStep, QueueOption::StrictOrder]
        .into_iter()
        .collect();

    assert_eq!(options.to_string(), "[strict_order, single_step]");
    assert_eq!(QueueOptions::new().to_string(), "[]");
}

#[test]
fn options_convert_back_to_values() {
    let options = QueueOptions::new().single_step();

    assert_eq!(Value::from(options), Value::list(["single_step"]));
}
