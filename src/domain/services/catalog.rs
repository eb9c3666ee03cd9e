#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde_json::json;

use crate::domain::models::Difficulty;
use crate::domain::models::Problem;
use crate::domain::models::TestCase;

/// The problem handed out when extraction or matching comes up empty. Two
/// Sum: approachable, and every candidate has seen it.
pub const DEFAULT_PROBLEM_ID: &str = "6802cff382aab64098bd479c";

fn test_case(input: serde_json::Value, expected_output: serde_json::Value) -> TestCase {
    return TestCase {
        input,
        expected_output,
    };
}

fn cases(entries: Vec<TestCase>) -> BTreeMap<String, TestCase> {
    return entries
        .into_iter()
        .enumerate()
        .map(|(idx, case)| {
            return (idx.to_string(), case);
        })
        .collect();
}

static PROBLEMS: Lazy<Vec<Problem>> = Lazy::new(|| {
    return vec![
        Problem {
            id: "680294d88e98930b17e3c6d7".to_string(),
            title: "Occurrence of a Character in a String".to_string(),
            description: "Given a string and a character, write a function to count how many times the character appears in the string. The comparison should be case-sensitive.".to_string(),
            difficulty: Difficulty::Medium,
            tags: vec!["string".to_string(), "hashmap".to_string()],
            test_cases: cases(vec![
                test_case(json!({"str": "hello world", "char": "l"}), json!(3)),
                test_case(json!({"str": "OpenAI", "char": "O"}), json!(1)),
                test_case(json!({"str": "Mississippi", "char": "s"}), json!(4)),
                test_case(json!({"str": "", "char": "a"}), json!(0)),
                test_case(json!({"str": "CaseSensitive", "char": "c"}), json!(0)),
            ]),
        },
        Problem {
            id: DEFAULT_PROBLEM_ID.to_string(),
            title: "Two Sum".to_string(),
            description: "Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target. You may assume that each input would have exactly one solution, and you may not use the same element twice. You can return the answer in any order.".to_string(),
            difficulty: Difficulty::Easy,
            tags: vec!["array".to_string(), "hashmap".to_string()],
            test_cases: cases(vec![
                test_case(json!({"nums": [2, 7, 11, 15], "target": 9}), json!([0, 1])),
                test_case(json!({"nums": [3, 2, 4], "target": 6}), json!([1, 2])),
                test_case(json!({"nums": [3, 3], "target": 6}), json!([0, 1])),
                test_case(json!({"nums": [1, 5, 8, 3, 9, 11], "target": 14}), json!([1, 4])),
                test_case(json!({"nums": [-1, -2, -3, -4, -5], "target": -8}), json!([2, 4])),
            ]),
        },
        Problem {
            id: "6802d24482aab64098bd479d".to_string(),
            title: "Reverse Linked List".to_string(),
            description: "Given the head of a singly linked list, reverse the list, and return the reversed list. A linked list can be reversed either iteratively or recursively.".to_string(),
            difficulty: Difficulty::Easy,
            tags: vec!["linked list".to_string(), "recursion".to_string()],
            test_cases: cases(vec![
                test_case(json!({"head": [1, 2, 3, 4, 5]}), json!([5, 4, 3, 2, 1])),
                test_case(json!({"head": [1, 2]}), json!([2, 1])),
                test_case(json!({"head": []}), json!([])),
                test_case(json!({"head": [7]}), json!([7])),
                test_case(json!({"head": [1, 2, 3, 4, 5, 6, 7, 8]}), json!([8, 7, 6, 5, 4, 3, 2, 1])),
            ]),
        },
        Problem {
            id: "6802d24e82aab64098bd479e".to_string(),
            title: "Valid Parentheses".to_string(),
            description: "Given a string s containing just the characters '(', ')', '{', '}', '[' and ']', determine if the input string is valid. An input string is valid if: 1. Open brackets must be closed by the same type of brackets. 2. Open brackets must be closed in the correct order. 3. Every close bracket has a corresponding open bracket of the same type.".to_string(),
            difficulty: Difficulty::Easy,
            tags: vec!["stack".to_string(), "string".to_string()],
            test_cases: cases(vec![
                test_case(json!({"s": "()"}), json!(true)),
                test_case(json!({"s": "()[]{}"}), json!(true)),
                test_case(json!({"s": "(]"}), json!(false)),
                test_case(json!({"s": "([)]"}), json!(false)),
                test_case(json!({"s": "{[]}"}), json!(true)),
            ]),
        },
        Problem {
            id: "6802d25982aab64098bd479f".to_string(),
            title: "Binary Search".to_string(),
            description: "Given an array of integers nums which is sorted in ascending order, and an integer target, write a function to search target in nums. If target exists, then return its index. Otherwise, return -1. You must write an algorithm with O(log n) runtime complexity.".to_string(),
            difficulty: Difficulty::Easy,
            tags: vec!["array".to_string(), "binary search".to_string(), "algorithm".to_string()],
            test_cases: cases(vec![
                test_case(json!({"nums": [-1, 0, 3, 5, 9, 12], "target": 9}), json!(4)),
                test_case(json!({"nums": [-1, 0, 3, 5, 9, 12], "target": 2}), json!(-1)),
                test_case(json!({"nums": [1, 2, 3, 4, 5], "target": 5}), json!(4)),
                test_case(json!({"nums": [1], "target": 1}), json!(0)),
                test_case(json!({"nums": [5, 7, 8, 10, 15, 18, 20], "target": 15}), json!(4)),
            ]),
        },
    ];
});

pub fn problems() -> &'static [Problem] {
    return &PROBLEMS;
}

pub fn find(id: &str) -> Option<&'static Problem> {
    return PROBLEMS.iter().find(|problem| {
        return problem.id == id;
    });
}

pub fn default_problem() -> &'static Problem {
    return find(DEFAULT_PROBLEM_ID).unwrap();
}

/// The catalog serialized for the matcher prompt: id, title, difficulty,
/// tags, and description per entry, as one JSON array.
pub fn serialized_for_matching() -> String {
    let entries = PROBLEMS
        .iter()
        .map(|problem| {
            return json!({
                "id": problem.id,
                "title": problem.title,
                "difficulty": problem.difficulty,
                "tags": problem.tags,
                "description": problem.description,
            });
        })
        .collect::<Vec<serde_json::Value>>();

    return serde_json::to_string(&entries).unwrap();
}
