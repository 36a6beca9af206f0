use rally_codriver::models::*;
use rally_codriver::parser::{self, ParseOptions};
use speculate2::speculate;

fn scenario_notes() -> Vec<PaceNote> {
    vec![
        PaceNote::new(6, "L", 100),
        PaceNote::new(4, "R", 50),
        PaceNote::new(0, "Crest", 200),
    ]
}

speculate! {
    describe "parse" {
        describe "well formed input" {
            it "parses every line in order" {
                let outcome = parser::parse("6,L,100\n4,R,50\n0,Crest,200");

                assert_eq!(outcome.notes, scenario_notes());
                assert!(outcome.diagnostics.is_empty());
            }

            it "skips blank lines silently" {
                let outcome = parser::parse("6,L,100\n\n4,R,50\n\n\n0,Crest,200");

                assert_eq!(outcome.notes, scenario_notes());
                assert!(outcome.diagnostics.is_empty());
            }

            it "trims whitespace around lines and values" {
                let outcome = parser::parse("  6  , L  , 100  \n  4,R,50 \n0, Crest ,200\n   ");

                assert_eq!(outcome.notes, scenario_notes());
                assert!(outcome.is_clean());
            }

            it "accepts signed integers" {
                let outcome = parser::parse("-3,L,+20");

                assert_eq!(outcome.notes, vec![PaceNote::new(-3, "L", 20)]);
            }

            it "reads back serialized notes unchanged" {
                let directions = ["L", "R", "Crest", "Jump", "Over bridge"];
                let notes: Vec<PaceNote> = (0..40)
                    .map(|i| PaceNote::new(i % 7, directions[i as usize % directions.len()], i * 15 - 100))
                    .collect();
                let raw = notes
                    .iter()
                    .map(|n| n.to_line(','))
                    .collect::<Vec<_>>()
                    .join("\n");

                let outcome = parser::parse(&raw);

                assert_eq!(outcome.notes, notes);
                assert!(outcome.diagnostics.is_empty());
            }
        }

        describe "empty input" {
            it "returns nothing for an empty string" {
                let outcome = parser::parse("");

                assert!(outcome.notes.is_empty());
                assert!(outcome.diagnostics.is_empty());
            }

            it "returns nothing for whitespace and newlines" {
                let outcome = parser::parse("\n   \n  \n");

                assert!(outcome.notes.is_empty());
                assert!(outcome.diagnostics.is_empty());
            }
        }

        describe "malformed lines" {
            it "reports lines with the wrong field count" {
                let outcome = parser::parse("6,L,100\n4,R\n0,Crest,200,Extra");

                assert_eq!(outcome.notes, vec![PaceNote::new(6, "L", 100)]);
                assert_eq!(outcome.diagnostics.len(), 2);
                assert_eq!(outcome.diagnostics[0], LineDiagnostic {
                    line_number: 2,
                    line: "4,R".to_string(),
                    kind: DiagnosticKind::WrongFieldCount { fields: 2 },
                });
                assert_eq!(outcome.diagnostics[1], LineDiagnostic {
                    line_number: 3,
                    line: "0,Crest,200,Extra".to_string(),
                    kind: DiagnosticKind::WrongFieldCount { fields: 4 },
                });
            }

            it "reports a non-integer radius" {
                let outcome = parser::parse("6,L,100\nFour,R,50\n0,Crest,200");

                assert_eq!(outcome.notes, vec![
                    PaceNote::new(6, "L", 100),
                    PaceNote::new(0, "Crest", 200),
                ]);
                assert_eq!(outcome.diagnostics.len(), 1);
                assert!(outcome.diagnostics[0].is_number_format());
                assert_eq!(outcome.diagnostics[0].line, "Four,R,50");
            }

            it "reports a non-integer distance" {
                let outcome = parser::parse("6,L,100\n4,R,Fifty\n0,Crest,200");

                assert_eq!(outcome.notes.len(), 2);
                assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::NumberFormat {
                    field: NumericField::Distance,
                });
            }

            it "keeps valid neighbours in order" {
                let outcome = parser::parse("1,L,10\nINVALID,R,20\n3,C,30\n4,X,Y,Z\n5,G,50");

                assert_eq!(outcome.notes, vec![
                    PaceNote::new(1, "L", 10),
                    PaceNote::new(3, "C", 30),
                    PaceNote::new(5, "G", 50),
                ]);
                assert_eq!(outcome.diagnostics.len(), 2);
                assert!(outcome.diagnostics[0].is_number_format());
                assert!(outcome.diagnostics[1].is_wrong_field_count());
            }

            it "keeps an empty direction when there are three fields" {
                let outcome = parser::parse("2, ,30");

                assert_eq!(outcome.notes, vec![PaceNote::new(2, "", 30)]);
            }

            it "rejects a trailing separator" {
                let outcome = parser::parse("6,L,100,");

                assert!(outcome.notes.is_empty());
                assert!(outcome.diagnostics[0].is_wrong_field_count());
            }

            it "yields only diagnostics when every line is bad" {
                let outcome = parser::parse("invalid,line\nanother,invalid");

                assert!(outcome.notes.is_empty());
                assert_eq!(outcome.diagnostics.len(), 2);
            }

            it "counts leading blank lines in line numbers" {
                let outcome = parser::parse("\n\n6,L,100\nbad");

                assert_eq!(outcome.notes, vec![PaceNote::new(6, "L", 100)]);
                assert_eq!(outcome.diagnostics[0].line_number, 4);
                assert_eq!(outcome.diagnostics[0].line, "bad");
            }

            it "counts line numbers across blank lines" {
                let outcome = parser::parse("6,L,100\n\nbad\n");

                assert_eq!(outcome.diagnostics[0].line_number, 3);
            }
        }

        describe "custom separator" {
            it "splits on the configured separator" {
                let outcome = parser::parse_with("6|L|100\n4|R|50", &ParseOptions { separator: '|' });

                assert_eq!(outcome.notes, vec![
                    PaceNote::new(6, "L", 100),
                    PaceNote::new(4, "R", 50),
                ]);
            }
        }
    }

    describe "diagnostic display" {
        it "describes a wrong field count" {
            let outcome = parser::parse("4,R");

            assert_eq!(
                outcome.diagnostics[0].to_string(),
                "line 1: expected 3 fields, found 2: \"4,R\""
            );
        }

        it "names the field that is not a number" {
            let outcome = parser::parse("4,R,Fifty");

            assert_eq!(
                outcome.diagnostics[0].to_string(),
                "line 1: distance is not an integer: \"4,R,Fifty\""
            );
        }
    }
}
