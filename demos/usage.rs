use boolmin::*;

fn main() {
    println!("A simple example!");

    for text in [
        "(A.B)+C",
        "A + !A",
        "!(((A+B).C).0)",
        "A.!A",
        "(first or second) and not (first and second)",
    ] {
        let result = minimize(text);
        println!("{:<48} {}", text, render_result(&result));

        if let Ok(minimized) = &result {
            println!("    prime implicants:");
            for p in minimized.primes() {
                println!("      {}", p.with_width(minimized.variables().len()));
            }
        }
    }
}
