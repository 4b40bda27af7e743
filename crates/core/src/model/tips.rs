use crate::model::operation::Operation;

/// Messages shown after a correct answer.
pub const ENCOURAGING_MESSAGES: [&str; 8] = [
    "Great job!",
    "Excellent work!",
    "You're getting better!",
    "Keep it up!",
    "Fantastic!",
    "Well done!",
    "Perfect!",
    "Outstanding!",
];

/// Study tips for an operation category, shown after missing problems of that kind.
#[must_use]
pub fn tips_for(operation: Operation) -> &'static [&'static str] {
    match operation {
        Operation::Addition => &[
            "Break large numbers into smaller parts",
            "Use the number line method for visualization",
            "Remember to carry over when numbers add up to 10 or more",
        ],
        Operation::Subtraction => &[
            "Check if you need to borrow from the next column",
            "Use addition to check your subtraction answers",
            "Count up from the smaller number to the larger number",
        ],
        Operation::Multiplication => &[
            "Learn your times tables by heart",
            "Use the distributive property: 6×14 = 6×10 + 6×4",
            "Check your answer by estimating first",
        ],
        Operation::Division => &[
            "Use multiplication to check your division answers",
            "Start with easier division facts you know",
            "Long division: Divide, Multiply, Subtract, Bring down",
        ],
        Operation::Square => &[
            "Squaring a number means multiplying it by itself.",
            "The last digit of a squared number can only be 0, 1, 4, 5, 6, or 9.",
        ],
        Operation::Sqrt => &[
            "Think of a number that, when multiplied by itself, gives the number in the square root.",
            "Estimating is a good way to start.",
        ],
        Operation::Cbrt => &[
            "Think of a number that, when multiplied by itself three times, gives the number in the cube root.",
        ],
        Operation::Trigonometry => &[
            "Remember SOH CAH TOA: Sin = Opposite/Hypotenuse, Cos = Adjacent/Hypotenuse, Tan = Opposite/Adjacent.",
            "The unit circle is your friend! It helps you visualize the values of sine and cosine for different angles.",
            "Know the special angles: 0°, 30°, 45°, 60°, 90° and their radian equivalents.",
        ],
    }
}
