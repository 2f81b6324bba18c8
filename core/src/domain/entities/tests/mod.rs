mod otp_challenge_tests;
mod token_tests;
