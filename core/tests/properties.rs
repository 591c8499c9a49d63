use std::panic::{catch_unwind, AssertUnwindSafe};

use rop_core::{catch_unwind as unwind, err, none, ok, some, try_block, Error, Maybe, Outcome, Panic};

fn raised<R>(f: impl FnOnce() -> R) -> Panic {
  let payload = catch_unwind(AssertUnwindSafe(f)).err().expect("expected a panic to be raised");
  *payload.downcast::<Panic>().expect("expected a `Panic` payload")
}

#[test]
fn map_preserves_presence() {
  let double = |x: i32| x * 2;
  for v in [-3, 0, 7] {
    assert_eq!(some(v).map(double).unwrap(), double(v));
  }
  assert_eq!(none::<i32>().map(double), none());
}

#[test]
fn projections_agree_with_variant() {
  let outcomes: [Outcome<i32, &str>; 3] = [ok(1), err("e"), ok(0)];
  for outcome in outcomes {
    assert_eq!(outcome.ok().is_some(), outcome.is_ok());
    assert_eq!(outcome.err().is_some(), outcome.is_err());
  }
}

#[test]
fn flatten_removes_exactly_one_level() {
  let nested: Outcome<Outcome<Outcome<i32, &str>, &str>, &str> = ok(ok(ok(1)));
  assert_eq!(nested.flatten(), ok(ok(1)));
  assert_eq!(nested.flatten().flatten(), ok(1));
  let nested: Maybe<Maybe<Maybe<i32>>> = some(some(some(1)));
  assert_eq!(nested.flatten(), some(some(1)));
}

#[test]
fn xor_is_some_iff_exactly_one_is_some() {
  let maybes = [some(2), some(3), none()];
  for a in maybes {
    for b in maybes {
      assert_eq!(a.xor(b).is_some(), a.is_some() != b.is_some());
    }
  }
  assert_eq!(some(2).xor(some(2)), none());
  assert_eq!(some(2).xor(none()), some(2));
}

#[test]
fn try_block_never_runs_past_failed_checkpoint() {
  let mut counter = 0;
  let outcome: Outcome<i32, &str> = try_block(|co| {
    let counter = &mut counter;
    async move {
      let a = co.check(ok::<i32, &str>(1)).await;
      *counter += 1;
      let b = co.check(err::<i32, &str>("boom")).await;
      *counter += 1;
      let c = co.check(ok::<i32, &str>(2)).await;
      ok(a + b + c)
    }
  });
  assert_eq!(outcome, err("boom"));
  assert_eq!(counter, 1);
}

#[test]
fn unwind_demotes_panic_keeping_it_as_cause() {
  let outcome: Outcome<(), Error> = unwind(|| Panic::new("x").with_cause("y").raise());
  let error = outcome.unwrap_err();
  assert_eq!(error.message(), "x");
  let panic = error.cause().and_then(|c| c.downcast_ref::<Panic>()).expect("cause is the original panic");
  assert_eq!(panic.message(), "x");
  assert_eq!(panic.cause().and_then(|c| c.downcast_ref::<&str>()), Some(&"y"));
}

#[test]
fn unwind_passes_errors_through() {
  let outcome: Outcome<(), Error> = unwind(|| std::panic::panic_any(Error::new("plain")));
  let error = outcome.unwrap_err();
  assert_eq!(error.message(), "plain");
  assert!(error.cause().is_none());
}

#[test]
fn expect_raises_panic_with_message_and_cause() {
  let panic = raised(|| err::<i32, &str>("e").expect("msg"));
  assert_eq!(panic.message(), "msg");
  assert_eq!(panic.cause().and_then(|c| c.downcast_ref::<&str>()), Some(&"e"));

  let panic = raised(|| ok::<i32, &str>(3).expect_err("msg"));
  assert_eq!(panic.message(), "msg");
  assert_eq!(panic.cause().and_then(|c| c.downcast_ref::<i32>()), Some(&3));
}

#[test]
fn combinators_do_not_catch_panics() {
  let panic = raised(|| ok::<i32, &str>(1).map(|_| -> i32 { Panic::new("inside map").raise() }));
  assert_eq!(panic.message(), "inside map");
  let panic = raised(|| some(1).and_then(|_| -> Maybe<i32> { Panic::new("inside and_then").raise() }));
  assert_eq!(panic.message(), "inside and_then");
}

#[test]
fn collect_stops_at_first_err() {
  let parsed: Outcome<Vec<i32>, String> = ["1", "2", "3"].iter()
    .map(|s| Outcome::from(s.parse::<i32>()).map_err(|e| e.to_string()))
    .collect();
  assert_eq!(parsed, ok(vec![1, 2, 3]));

  let mut seen = 0;
  let parsed: Outcome<Vec<i32>, &str> = [ok(1), err("bad"), ok(3)].into_iter()
    .inspect(|_| seen += 1)
    .collect();
  assert_eq!(parsed, err("bad"));
  assert_eq!(seen, 2);
}

#[test]
fn ordering_puts_absence_and_success_first() {
  assert!(none() < some(0));
  assert!(some(1) < some(2));
  assert!(ok::<i32, i32>(9) < err(0));
  assert!(err::<i32, i32>(1) < err(2));
}

#[cfg(feature = "serde")]
#[test]
fn json_projection() {
  assert_eq!(serde_json::to_string(&ok::<i32, String>(1)).unwrap(), r#"{"Ok":1}"#);
  assert_eq!(serde_json::to_string(&err::<i32, &str>("e")).unwrap(), r#"{"Err":"e"}"#);
  assert_eq!(serde_json::to_string(&some(1)).unwrap(), "1");
  assert_eq!(serde_json::to_string(&none::<i32>()).unwrap(), "null");
  assert_eq!(serde_json::from_str::<Maybe<i32>>("null").unwrap(), none());
}
