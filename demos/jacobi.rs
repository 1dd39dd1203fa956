extern crate natural_spline;

use nalgebra::DVector;
use natural_spline::{
    build_spline_system, recover_coefficients, residual_norm, solve_direct, solve_jacobi,
};

fn main() {

    let x = vec![0.0, 0.5, 1.5, 2.0, 3.5, 4.0];
    let y = vec![0.0, 1.0, -1.0, 0.5, 2.0, 0.0];

    let (matrix, rhs) = build_spline_system(&x, &y).unwrap();
    let result = solve_jacobi(&matrix, &rhs, &DVector::zeros(x.len()), 1e-10, 1000).unwrap();
    let direct = solve_direct(&matrix, &rhs).unwrap();

    println!("iteration;step_norm");
    for (i, step) in result.residuals.iter().enumerate() {
        println!("{};{:e}", i + 1, step);
    }

    println!();
    println!("converged: {} after {} iterations", result.converged, result.iterations);
    println!("residual norm: {:e}", residual_norm(&matrix, &result.solution, &rhs).unwrap());
    println!("max difference to LU: {:e}", (&result.solution - &direct).amax());

    let coefficients = recover_coefficients(&x, &y, &result.solution).unwrap();
    println!();
    println!("i;b;c;d");
    for i in 0..coefficients.b.len() {
        let (b, c, d) = (coefficients.b[i], coefficients.c[i], coefficients.d[i]);
        println!("{};{:.4};{:.4};{:.4}", i, b, c, d);
    }
}
