use chrono::NaiveDateTime;
use timegrid_core::{
    build_grid, pipe, ChronoAdapter, DateAdapter, Events, EventsPlugin, GridOptions, Range,
    TimeGrid, TimedEvent, Unit,
};

fn parse(value: &str) -> NaiveDateTime {
    ChronoAdapter::new().from_iso(value).expect("valid iso date")
}

#[derive(Debug, Clone, PartialEq)]
struct Booking {
    room: &'static str,
    from: NaiveDateTime,
    until: NaiveDateTime,
}

impl TimedEvent<NaiveDateTime> for Booking {
    fn start(&self) -> NaiveDateTime {
        self.from
    }

    fn end(&self) -> NaiveDateTime {
        self.until
    }
}

fn week() -> TimeGrid<(), ChronoAdapter> {
    let range = Range::new(parse("2026-05-04"), parse("2026-05-10"));
    build_grid(&ChronoAdapter::new(), &GridOptions::new(range, Unit::Day)).expect("grid build")
}

fn bind(bookings: Vec<Booking>) -> TimeGrid<(), ChronoAdapter> {
    pipe(week(), &[&EventsPlugin::new(bookings)]).expect("pipe")
}

fn rooms<'a>(events: &[&'a Booking]) -> Vec<&'a str> {
    events.iter().map(|booking| booking.room).collect()
}

#[test]
fn event_ending_at_midnight_stays_in_the_previous_day() {
    let grid = bind(vec![Booking {
        room: "atrium",
        from: parse("2026-05-05T20:00"),
        until: parse("2026-05-06T00:00"),
    }]);
    let events = grid
        .extension::<Events<Booking, ChronoAdapter>>()
        .expect("events present");

    let tuesday = grid.cell_by_key("2026-05-05").expect("tuesday");
    let wednesday = grid.cell_by_key("2026-05-06").expect("wednesday");
    assert_eq!(rooms(&events.events_for_cell(tuesday)), vec!["atrium"]);
    assert!(events.events_for_cell(wednesday).is_empty());
}

#[test]
fn multi_day_event_appears_in_every_overlapped_cell() {
    let grid = bind(vec![
        Booking {
            room: "loft",
            from: parse("2026-05-06T22:00"),
            until: parse("2026-05-08T01:00"),
        },
        Booking {
            room: "studio",
            from: parse("2026-05-07T09:00"),
            until: parse("2026-05-07T10:00"),
        },
    ]);
    let events = grid
        .extension::<Events<Booking, ChronoAdapter>>()
        .expect("events present");

    let per_day: Vec<usize> = grid
        .iter()
        .map(|cell| events.events_for_cell(cell).len())
        .collect();
    assert_eq!(per_day, vec![0, 0, 1, 2, 1, 0, 0]);
    assert_eq!(
        rooms(&events.events_for_date(parse("2026-05-07T18:00"))),
        vec!["loft", "studio"]
    );
}

#[test]
fn zero_length_event_belongs_to_its_instant() {
    let grid = bind(vec![Booking {
        room: "lobby",
        from: parse("2026-05-09T00:00"),
        until: parse("2026-05-09T00:00"),
    }]);
    let events = grid
        .extension::<Events<Booking, ChronoAdapter>>()
        .expect("events present");

    assert_eq!(events.events_for_date(parse("2026-05-09T13:00")).len(), 1);
    assert!(events.events_for_date(parse("2026-05-08T13:00")).is_empty());
    assert_eq!(events.events_in_view().len(), 1);
}

#[test]
fn view_is_bounded_by_the_grid() {
    let grid = bind(vec![
        Booking {
            room: "before",
            from: parse("2026-05-01T09:00"),
            until: parse("2026-05-04T00:00"),
        },
        Booking {
            room: "inside",
            from: parse("2026-05-10T23:00"),
            until: parse("2026-05-11T02:00"),
        },
        Booking {
            room: "after",
            from: parse("2026-05-11T00:00"),
            until: parse("2026-05-11T02:00"),
        },
    ]);
    let events = grid
        .extension::<Events<Booking, ChronoAdapter>>()
        .expect("events present");

    assert_eq!(events.len(), 3);
    assert_eq!(rooms(&events.events_in_view()), vec!["inside"]);
    assert_eq!(events.events_for_date(parse("2026-05-11T12:00")).len(), 2);
}

#[test]
fn week_grid_resolves_dates_to_their_week_cell() {
    let range = Range::new(parse("2026-01-05"), parse("2026-01-18"));
    let grid: TimeGrid<(), ChronoAdapter> =
        build_grid(&ChronoAdapter::new(), &GridOptions::new(range, Unit::Week))
            .expect("grid build");
    let grid = pipe(
        grid,
        &[&EventsPlugin::new(vec![
            Booking {
                room: "workshop",
                from: parse("2026-01-06"),
                until: parse("2026-01-07"),
            },
            Booking {
                room: "offsite",
                from: parse("2026-01-20"),
                until: parse("2026-01-21"),
            },
        ])],
    )
    .expect("pipe");
    let events = grid
        .extension::<Events<Booking, ChronoAdapter>>()
        .expect("events present");

    let saturday = parse("2026-01-10T15:00");
    let cell = grid.cell_by_date(saturday).expect("first week");
    assert_eq!(cell.key, "2026-01-05");
    assert_eq!(
        rooms(&events.events_for_date(saturday)),
        rooms(&events.events_for_cell(cell))
    );
    assert_eq!(rooms(&events.events_for_date(saturday)), vec!["workshop"]);
    assert!(events.events_for_date(parse("2026-01-13")).is_empty());

    // Outside the grid the week still starts on the grid's weekday.
    assert_eq!(rooms(&events.events_for_date(parse("2026-01-24"))), vec!["offsite"]);
    assert_eq!(events.events_in_view().len(), 1);
}
