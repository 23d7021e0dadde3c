use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Prime factorization of `n` as `(prime, exponent)` pairs in ascending
/// order. Zero and one have no prime factors.
pub fn prime_factorization(n: &BigUint) -> Vec<(BigUint, u32)> {
  let mut factors = Vec::new();
  if n.is_zero() || n.is_one() {
    return factors;
  }

  let mut num = n.clone();
  let two = BigUint::from(2u32);

  // Handle factor of 2
  let mut count = 0u32;
  while num.is_even() {
    count += 1;
    num /= &two;
  }
  if count > 0 {
    factors.push((two.clone(), count));
  }

  // Handle odd factors
  let mut i = BigUint::from(3u32);
  while &i * &i <= num {
    let mut count = 0u32;
    while (&num % &i).is_zero() {
      count += 1;
      num /= &i;
    }
    if count > 0 {
      factors.push((i.clone(), count));
    }
    i += &two;
  }

  if !num.is_one() {
    factors.push((num, 1));
  }

  factors
}

/// Every divisor of `n`, ascending, built from its prime factorization.
/// Zero has none.
pub fn unique_factors(n: &BigUint) -> Vec<BigUint> {
  if n.is_zero() {
    return Vec::new();
  }

  let mut divisors = vec![BigUint::one()];
  for (prime, exponent) in prime_factorization(n) {
    let mut extended =
      Vec::with_capacity(divisors.len() * (exponent as usize + 1));
    for divisor in &divisors {
      let mut power = BigUint::one();
      for _ in 0..=exponent {
        extended.push(divisor * &power);
        power *= &prime;
      }
    }
    divisors = extended;
  }

  divisors.sort();
  divisors
}

pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
  a.gcd(b)
}

pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
  if a.is_zero() || b.is_zero() {
    return BigUint::zero();
  }
  a.lcm(b)
}
