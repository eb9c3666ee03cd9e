pub fn article_fixture() -> &'static str {
    return r#"
Interview Experience at Initech (SDE-1, Offer)

Round 1 was an online coding round. The interviewer asked me to reverse a
singly linked list, first iteratively and then recursively, and we discussed
the trade-offs of each approach. As a follow-up I had to check whether a
string of brackets was balanced using a stack.

Round 2 was mostly behavioral. I was asked to tell them about a time I
disagreed with a teammate on a design decision, and how I handled a deadline
I knew we were going to miss. The interviewer pushed hard on specifics.

Round 3 was a bar-raiser with a mix of system design and a short coding
exercise on counting character occurrences in a string. Verdict came a week
later: offer!
"#
    .trim();
}

pub fn resume_fixture() -> &'static str {
    return r#"
Jordan Doe
Backend engineer, five years of Rust and distributed systems.

Experience:
- Built a session-backed evaluation service handling 2k requests per minute.
- Led the migration of a document store from nightly dumps to incremental
  snapshots.

Education: BSc Computer Science.
"#
    .trim();
}
